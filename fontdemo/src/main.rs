use clap::Parser;
use fontdemo_lib::demo::{DemoOptions, LOREM_IPSUM};
use fontdemo_lib::error::FontDemoError;
use fontdemo_lib::generate::font_demo;
use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;

const FONTDEMO_INTRO: &str = r#"
     ___         _   ___
    | __|__ _ _ | |_|   \ ___ _ __  ___
    | _/ _ \ ' \|  _| |) / -_) '  \/ _ \
    |_|\___/_||_|\__|___/\___|_|_|_\___/

    Font specimens from @font-face rules.
"#;

#[derive(Parser)]
#[command(name = "fontdemo")]
#[command(about = "Prepend a font demo for every @font-face rule to an HTML page")]
struct Args {
    /// Input HTML file.
    input: PathBuf,

    /// Output HTML file. Writes to stdout when omitted.
    output: Option<PathBuf>,

    /// Site root that `/`-prefixed style sheet links resolve against.
    /// Defaults to the input file's directory.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Text set in each font.
    #[arg(long, default_value = LOREM_IPSUM)]
    sample_text: String,

    /// Don't print the banner.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // parse the args given in terminal
    let args: Args = Args::parse();
    if !args.quiet {
        eprintln!("{}", FONTDEMO_INTRO);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), FontDemoError> {
    let options = DemoOptions {
        sample_text: args.sample_text.clone(),
    };
    let generated = font_demo::generate_file(&args.input, args.root.as_deref(), &options)?;

    let report = &generated.report;
    if !report.inserted {
        warn!("no font demo inserted into {}", args.input.display());
    }
    for skipped in &report.skipped {
        info!("skipped rule: {} ({})", skipped, skipped.code());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &generated.html).map_err(|source| FontDemoError::Write {
                path: path.clone(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", generated.html),
    }
    Ok(())
}
