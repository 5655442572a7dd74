mod app;
mod config;
mod effects;
mod logging;
mod ui;

fn main() -> Result<(), app::AppError> {
    app::run_app()
}
