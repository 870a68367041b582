use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod output;

use output::ColorMode;

use pdfquiz_ingest::{OcrPolicy, ParsingConfigBuilder};
use pdfquiz_parsing::QuizExtractor;

/// PDF Quiz Extractor - Convert multiple-choice question PDFs into structured quizzes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract questions from a PDF (or plain-text) file
    Extract {
        /// Path to the PDF or .txt file to extract questions from
        file_path: PathBuf,

        /// Emit the full extraction result as JSON instead of a listing
        #[arg(long)]
        json: bool,

        /// Path to an output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Disable the OCR fallback for pages without a text layer
        #[arg(long)]
        no_ocr: bool,

        /// Tesseract language code for the OCR fallback
        #[arg(long, default_value = "eng")]
        ocr_lang: String,

        /// Fabricate placeholder options A-D for blocks that parse none
        /// (compatibility behavior, corrupts quiz quality)
        #[arg(long)]
        synthesize_options: bool,

        /// Pick a random correct letter for blocks missing an Answer line
        /// instead of dropping them (compatibility behavior)
        #[arg(long)]
        random_answer_fallback: bool,

        /// Drop questions whose stated answer letter names no parsed option
        #[arg(long)]
        require_answer_match: bool,

        /// Log pipeline details to stderr (overridden by RUST_LOG)
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            file_path,
            json,
            output,
            no_color,
            no_ocr,
            ocr_lang,
            synthesize_options,
            random_answer_fallback,
            require_answer_match,
            verbose,
        } => {
            init_tracing(verbose);
            extract(
                file_path,
                json,
                output,
                no_color,
                no_ocr,
                ocr_lang,
                synthesize_options,
                random_answer_fallback,
                require_answer_match,
            )
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::too_many_arguments)]
fn extract(
    file_path: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    no_color: bool,
    no_ocr: bool,
    ocr_lang: String,
    synthesize_options: bool,
    random_answer_fallback: bool,
    require_answer_match: bool,
) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    // Determine color mode and output writer
    let use_color = !no_color && output.is_none();
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    let config = ParsingConfigBuilder::new()
        .synthesize_missing_options(synthesize_options)
        .random_answer_fallback(random_answer_fallback)
        .require_answer_in_options(require_answer_match)
        .build()?;
    let extractor = QuizExtractor::with_config(config);

    let ocr = if no_ocr {
        OcrPolicy::Disabled
    } else {
        OcrPolicy::Auto { language: ocr_lang }
    };

    let extraction = pdfquiz_ingest::extract_questions_with(&file_path, &extractor, &ocr)?;

    if json {
        serde_json::to_writer_pretty(&mut writer, &extraction)?;
        writeln!(writer)?;
        return Ok(());
    }

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());

    output::print_extraction_summary(&mut writer, &file_name, &extraction, color)?;

    if extraction.questions.is_empty() {
        output::print_empty_hint(&mut writer, color)?;
        return Ok(());
    }

    output::print_questions(&mut writer, &extraction.questions, color)?;
    Ok(())
}
