//! Terminal presentation: the interactive form and result banners.

use crate::config::Config;
use crate::pipeline::PipelineError;
use crate::request::{ApiKey, ModelName, Request, MAX_TOKENS_RANGE, TEMPERATURE_RANGE};
use crate::summary::Summary;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

/// Ask for every request field, pre-filled from config
pub fn prompt_request(config: &Config) -> anyhow::Result<Request> {
    let theme = ColorfulTheme::default();

    println!("{}", "🩺 Medical Content Summarizer".bold());
    println!("Summarize YouTube videos or trusted medical websites\n");

    let api_credential = match config.api_key() {
        Some(key) if !key.is_blank() => key,
        _ => ApiKey::new(
            Password::with_theme(&theme)
                .with_prompt("🔑 OpenAI API Key")
                .allow_empty_password(true)
                .interact()?,
        ),
    };

    let labels = ModelName::ALL.map(|model| model.as_str());
    let default_model = ModelName::ALL
        .iter()
        .position(|model| *model == config.agent.model)
        .unwrap_or(0);
    let model_name = ModelName::ALL[Select::with_theme(&theme)
        .with_prompt("Choose OpenAI Model")
        .items(&labels)
        .default(default_model)
        .interact()?];

    let temperature: f32 = Input::with_theme(&theme)
        .with_prompt("Temperature (creativity, 0.0-1.0)")
        .default(config.agent.temperature)
        .validate_with(|value: &f32| -> Result<(), String> {
            if TEMPERATURE_RANGE.contains(value) {
                Ok(())
            } else {
                Err("temperature must be between 0.0 and 1.0".into())
            }
        })
        .interact_text()?;

    let max_tokens: u32 = Input::with_theme(&theme)
        .with_prompt("Max Tokens (length of response, 50-400)")
        .default(config.agent.max_tokens)
        .validate_with(|value: &u32| -> Result<(), String> {
            if MAX_TOKENS_RANGE.contains(value) {
                Ok(())
            } else {
                Err("max tokens must be between 50 and 400".into())
            }
        })
        .interact_text()?;

    let raw_url: String = Input::with_theme(&theme)
        .with_prompt("Paste a YouTube or Medical Website URL")
        .allow_empty(true)
        .interact_text()?;

    Ok(Request::new(raw_url, api_credential)
        .model(model_name)
        .temperature(temperature)
        .max_tokens(max_tokens))
}

pub fn print_parameters(request: &Request) {
    println!(
        "{}",
        format!(
            "Using '{}' model with temperature={}, max_tokens={}.",
            request.model_name, request.temperature, request.max_tokens
        )
        .cyan()
    );
}

pub fn print_summary(summary: &Summary) {
    println!("\n{}\n", "✅ Summary:".green().bold());
    println!("{}", summary.text);
}

/// Show an error banner with its cause chain
pub fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Validation(validation)) => {
            eprintln!("{}", format!("❌ {validation}").red().bold());
        }
        Some(pipeline_err) => {
            eprintln!("{}", "❌ An error occurred while summarizing.".red().bold());
            eprintln!("   {pipeline_err}");
        }
        None => {
            eprintln!("{}", format!("❌ {err}").red().bold());
            for cause in err.chain().skip(1) {
                eprintln!("   caused by: {cause}");
            }
        }
    }
}
