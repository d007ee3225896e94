use anyhow::Result;
use chrono::Local;
use homagama_ui::{PredictionWorkflow, TerminalPresenter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize core
    homagama_core::init()?;

    // Load config and resolve the prediction endpoint once
    let mut app = homagama_core::App::new()?;
    tracing::info!("Homagama predictor started");

    let workflow = PredictionWorkflow::from_app(&app, Local)?;
    let mut presenter = TerminalPresenter::stdout();

    let outcome = workflow.run(&mut presenter).await;

    // Graceful shutdown
    app.shutdown()?;

    if outcome.is_err() {
        // Already reported through the presenter
        std::process::exit(1);
    }

    Ok(())
}
