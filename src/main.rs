fn main() -> anyhow::Result<()> {
    roster::run()?;
    Ok(())
}
