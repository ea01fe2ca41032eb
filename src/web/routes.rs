use crate::core::error::RosterError;
use crate::core::output::compact_line;
use crate::core::store::Store;
use crate::plugins::adolescent::{self, Adolescent};
use crate::plugins::guardian;
use crate::plugins::study;
use crate::web::AppState;
use crate::web::gate::{self, LOGIN_PATH};
use crate::web::views;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Raw create/edit form as posted by the browser.
#[derive(Debug, Deserialize)]
pub struct AdolescentForm {
    pub nome: String,
    pub idade: String,
    pub data_nascimento: String,
    pub genero: String,
    pub pg_id: String,
    pub imperio: String,
}

#[derive(Debug, Deserialize)]
pub struct GuardianForm {
    pub nome_pg: String,
}

#[derive(Debug, Deserialize)]
pub struct StudyForm {
    pub tema: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AdolescentFields {
    name: String,
    age: i64,
    birth_date: NaiveDate,
    gender: String,
    guardian_id: i64,
    team: String,
}

impl AdolescentForm {
    fn parse(self) -> Result<AdolescentFields, RosterError> {
        Ok(AdolescentFields {
            age: self.idade.trim().parse()?,
            birth_date: adolescent::parse_birth_date(&self.data_nascimento)?,
            guardian_id: self.pg_id.trim().parse()?,
            name: self.nome,
            gender: self.genero,
            team: self.imperio,
        })
    }
}

impl AdolescentFields {
    fn overwrite(self, record: &mut Adolescent) {
        record.name = self.name;
        record.age = self.age;
        record.birth_date = self.birth_date;
        record.gender = self.gender;
        record.guardian_id = self.guardian_id;
        record.team = self.team;
    }

    fn into_record(self) -> Adolescent {
        adolescent::create(
            &self.name,
            self.age,
            self.birth_date,
            &self.gender,
            self.guardian_id,
            &self.team,
        )
    }
}

/// Run storage work on the blocking pool.
async fn on_store<T, F>(state: &AppState, op: F) -> Result<T, RosterError>
where
    F: FnOnce(&Store) -> Result<T, RosterError> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(&store)).await?
}

fn roster_snapshot(store: &Store) -> Result<(Vec<adolescent::RosterEntry>, i64), RosterError> {
    Ok((adolescent::list_with_guardians(store)?, adolescent::count(store)?))
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, RosterError> {
    let (entries, total) = on_store(&state, roster_snapshot).await?;
    Ok(Html(views::index_page(&entries, total, None)))
}

pub async fn login_page() -> Html<String> {
    Html(views::login_page())
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username == state.config.username && form.password == state.config.password {
        tracing::info!(username = %form.username, "operator logged in");
        let jar = jar.add(gate::login_cookie(state.config.session_idle_minutes));
        return (jar, Redirect::to("/")).into_response();
    }
    tracing::info!(username = %form.username, "login rejected");
    Html(views::login_page()).into_response()
}

pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (jar.remove(gate::logout_cookie()), Redirect::to(LOGIN_PATH))
}

pub async fn new_adolescent_form(
    State(state): State<AppState>,
) -> Result<Html<String>, RosterError> {
    render_adolescent_form(&state, None).await
}

pub async fn edit_adolescent_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, RosterError> {
    render_adolescent_form(&state, Some(id)).await
}

async fn render_adolescent_form(
    state: &AppState,
    id: Option<i64>,
) -> Result<Html<String>, RosterError> {
    let (record, guardians) = on_store(state, move |store| {
        let record = match id {
            Some(id) => adolescent::get_by_id(store, id)?,
            None => None,
        };
        Ok((record, guardian::list_guardians(store)?))
    })
    .await?;
    Ok(Html(views::adolescent_form_page(record.as_ref(), &guardians)))
}

pub async fn create_adolescent(
    State(state): State<AppState>,
    Form(form): Form<AdolescentForm>,
) -> Result<Redirect, RosterError> {
    let fields = form.parse()?;
    on_store(&state, move |store| save_adolescent(store, None, fields)).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_adolescent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AdolescentForm>,
) -> Result<Redirect, RosterError> {
    let fields = form.parse()?;
    on_store(&state, move |store| save_adolescent(store, Some(id), fields)).await?;
    Ok(Redirect::to("/"))
}

/// Overwrite the record resolved for `id`, or add a new one when nothing resolves.
fn save_adolescent(
    store: &Store,
    id: Option<i64>,
    fields: AdolescentFields,
) -> Result<(), RosterError> {
    let existing = match id {
        Some(id) => adolescent::get_by_id(store, id)?,
        None => None,
    };

    match existing {
        Some(mut record) => {
            fields.overwrite(&mut record);
            adolescent::update(store, &record)?;
            tracing::info!(id = ?record.id, name = %record.name, "adolescent updated");
        }
        None => {
            let mut record = fields.into_record();
            let id = adolescent::add(store, &mut record)?;
            tracing::info!(id, name = %record.name, "adolescent added");
        }
    }
    Ok(())
}

pub async fn register_guardian(
    State(state): State<AppState>,
    Form(form): Form<GuardianForm>,
) -> Result<Redirect, RosterError> {
    let guardian =
        on_store(&state, move |store| guardian::add_guardian(store, &form.nome_pg)).await?;
    tracing::info!(id = guardian.id, name = %guardian.name, "guardian registered");
    Ok(Redirect::to("/"))
}

pub async fn delete_adolescent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, RosterError> {
    let record = on_store(&state, move |store| {
        let record = adolescent::get_by_id(store, id)?
            .ok_or_else(|| RosterError::NotFound(format!("adolescent {}", id)))?;
        adolescent::delete(store, &record)?;
        Ok(record)
    })
    .await?;
    tracing::info!(id, name = %record.name, "adolescent deleted");
    Ok(Redirect::to("/"))
}

pub async fn study_outline(
    State(state): State<AppState>,
    Form(form): Form<StudyForm>,
) -> Result<Html<String>, RosterError> {
    tracing::info!(topic = %compact_line(&form.tema, 80), "generating study outline");
    let client = state.study.clone();
    let topic = form.tema;
    let text = tokio::task::spawn_blocking(move || client.generate(&topic)).await??;

    let lines = study::outline_lines(&text);
    let (entries, total) = on_store(&state, roster_snapshot).await?;
    Ok(Html(views::index_page(&entries, total, Some(&lines))))
}
