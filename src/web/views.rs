//! Server-rendered HTML pages. Every interpolated value goes through [`escape`].

use crate::plugins::adolescent::{Adolescent, RosterEntry};
use crate::plugins::guardian::Guardian;
use std::fmt::Write;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn login_page() -> String {
    layout(
        "Login",
        "<h1>Login</h1>
<form method=\"post\" action=\"/login\">
  <label>Usuário <input type=\"text\" name=\"username\"></label>
  <label>Senha <input type=\"password\" name=\"password\"></label>
  <button type=\"submit\">Entrar</button>
</form>",
    )
}

/// The roster page. `outline` holds study-outline lines when one was just generated.
pub fn index_page(entries: &[RosterEntry], total: i64, outline: Option<&[String]>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Adolescentes</h1>\n<p><a href=\"/adolescente\">Novo adolescente</a> | <a href=\"/logout\">Sair</a></p>\n");
    let _ = writeln!(body, "<p>Total de adolescentes: <strong>{}</strong></p>", total);

    body.push_str("<table>\n<tr><th>Nome</th><th>Idade</th><th>Nascimento</th><th>Gênero</th><th>PG</th><th>Império</th><th></th></tr>\n");
    for e in entries {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/adolescente/{}\">Editar</a> <a href=\"/excluir/{}\">Excluir</a></td></tr>",
            escape(&e.name),
            e.age,
            e.birth_date,
            escape(&e.gender),
            escape(&e.guardian_name),
            escape(&e.team),
            e.id,
            e.id
        );
    }
    body.push_str("</table>\n");

    body.push_str(
        "<h2>Cadastrar PG</h2>
<form method=\"post\" action=\"/cadastrar_pg\">
  <input type=\"text\" name=\"nome_pg\">
  <button type=\"submit\">Cadastrar</button>
</form>
<h2>Roteiro de estudo</h2>
<form method=\"post\" action=\"/chatgpt\">
  <input type=\"text\" name=\"tema\">
  <button type=\"submit\">Gerar</button>
</form>\n",
    );

    if let Some(lines) = outline {
        body.push_str("<ol class=\"roteiro\">\n");
        for line in lines {
            let _ = writeln!(body, "<li>{}</li>", escape(line));
        }
        body.push_str("</ol>\n");
    }

    layout("Adolescentes", &body)
}

/// Create form when `record` is `None`, edit form otherwise.
pub fn adolescent_form_page(record: Option<&Adolescent>, guardians: &[Guardian]) -> String {
    let action = match record.and_then(|r| r.id) {
        Some(id) => format!("/adolescente/{}", id),
        None => "/adolescente".to_string(),
    };
    let name = record.map(|r| escape(&r.name)).unwrap_or_default();
    let age = record.map(|r| r.age.to_string()).unwrap_or_default();
    let born = record.map(|r| r.birth_date.to_string()).unwrap_or_default();
    let gender = record.map(|r| escape(&r.gender)).unwrap_or_default();
    let team = record.map(|r| escape(&r.team)).unwrap_or_default();
    let selected_guardian = record.map(|r| r.guardian_id);

    let mut options = String::new();
    for g in guardians {
        let selected = if selected_guardian == Some(g.id) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            options,
            "    <option value=\"{}\"{}>{}</option>",
            g.id,
            selected,
            escape(&g.name)
        );
    }

    let heading = if record.is_some() {
        "Editar adolescente"
    } else {
        "Novo adolescente"
    };
    let body = format!(
        "<h1>{heading}</h1>
<form method=\"post\" action=\"{action}\">
  <label>Nome <input type=\"text\" name=\"nome\" value=\"{name}\"></label>
  <label>Idade <input type=\"number\" name=\"idade\" value=\"{age}\"></label>
  <label>Nascimento <input type=\"date\" name=\"data_nascimento\" value=\"{born}\"></label>
  <label>Gênero <input type=\"text\" name=\"genero\" value=\"{gender}\"></label>
  <label>PG <select name=\"pg_id\">
{options}  </select></label>
  <label>Império <input type=\"text\" name=\"imperio\" value=\"{team}\"></label>
  <button type=\"submit\">Salvar</button>
</form>
<p><a href=\"/\">Voltar</a></p>"
    );
    layout(heading, &body)
}
