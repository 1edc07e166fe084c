use clap::{Args, Parser, Subcommand};
use emotify_codegen::{CollisionPolicy, TransformOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "emotify")]
#[command(about = "emotify — convert Sass stylesheets into Emotion css modules")]
#[command(version)]
struct Cli {
    /// Log each pass while converting
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert .scss files (or directories of them) to .js modules
    Build {
        /// Input files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Write modules into this directory instead of next to each source
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print modules to stdout instead of writing files
        #[arg(long, conflicts_with = "out_dir")]
        stdout: bool,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Convert without writing anything, reporting errors only
    Check {
        /// Input files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Prefix of fe-brary variables
    #[arg(long, default_value = "$fe-brary-")]
    prefix: String,

    /// Binding for the fe-brary variables
    #[arg(long, default_value = "vars")]
    vars_name: String,

    /// Module the fe-brary variables are imported from
    #[arg(long, default_value = "@domain-group/fe-brary")]
    vars_module: String,

    /// Binding for project variables
    #[arg(long, default_value = "customVars")]
    custom_vars_name: String,

    /// Module project variables are imported from
    #[arg(long, default_value = "../variables")]
    custom_vars_module: String,

    /// Module `css` is imported from
    #[arg(long, default_value = "emotion")]
    runtime_module: String,

    /// Fail when two constructs produce the same name
    #[arg(long)]
    strict: bool,

    /// Keep the assembled whitespace as-is
    #[arg(long)]
    no_tidy: bool,
}

impl OptionArgs {
    fn to_options(&self) -> TransformOptions {
        TransformOptions {
            special_prefix: self.prefix.clone(),
            special_namespace: self.vars_name.clone(),
            special_import: format!(
                "import {{ variables as {} }} from '{}';",
                self.vars_name, self.vars_module
            ),
            local_namespace: self.custom_vars_name.clone(),
            local_import: format!(
                "import {} from '{}';",
                self.custom_vars_name, self.custom_vars_module
            ),
            runtime_import: format!("import {{ css }} from '{}';", self.runtime_module),
            template_tag: "css".into(),
            collisions: if self.strict {
                CollisionPolicy::Error
            } else {
                CollisionPolicy::Warn
            },
            tidy: !self.no_tidy,
        }
    }
}

/// Where converted modules go.
enum Destination {
    Beside,
    Directory(PathBuf),
    Stdout,
    Nowhere,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let failures = match cli.command {
        Command::Build {
            paths,
            out_dir,
            stdout,
            options,
        } => {
            let destination = match (out_dir, stdout) {
                (_, true) => Destination::Stdout,
                (Some(dir), false) => Destination::Directory(dir),
                (None, false) => Destination::Beside,
            };
            run(&paths, &options.to_options(), &destination)
        }
        Command::Check { paths, options } => {
            run(&paths, &options.to_options(), &Destination::Nowhere)
        }
    };

    if failures > 0 {
        eprintln!("{failures} file(s) failed");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "emotify=debug" } else { "emotify=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Convert every input, returning the number of failures.
fn run(paths: &[PathBuf], options: &TransformOptions, destination: &Destination) -> usize {
    let inputs = collect_inputs(paths);
    if inputs.is_empty() {
        eprintln!("Error: no .scss files found");
        return 1;
    }

    let mut failures = 0;
    for input in &inputs {
        if let Err(e) = convert(input, options, destination) {
            eprintln!("Error in {}: {e}", input.display());
            failures += 1;
        }
    }
    failures
}

/// Expand directories into the `.scss` files below them. Files are kept as given.
fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();

    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_scss(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        found.sort();
        inputs.extend(found);
    }

    inputs
}

fn is_scss(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "scss")
}

fn convert(input: &Path, options: &TransformOptions, destination: &Destination) -> Result<(), String> {
    let source = std::fs::read_to_string(input).map_err(|e| format!("cannot read file: {e}"))?;

    let output = emotify_codegen::transform(&source, &input.display().to_string(), options)
        .map_err(|e| e.to_string())?;
    for collision in &output.collisions {
        eprintln!(
            "Warning in {}: `{}` defined at line {} and line {}, keeping the later one",
            input.display(),
            collision.name,
            collision.first_line,
            collision.second_line
        );
    }

    let target = match destination {
        Destination::Nowhere => {
            tracing::info!(path = %input.display(), entries = output.entries.len(), "ok");
            return Ok(());
        }
        Destination::Stdout => {
            print!("{}", output.code);
            return Ok(());
        }
        Destination::Beside => input.with_extension("js"),
        Destination::Directory(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
            let stem = input
                .file_stem()
                .ok_or_else(|| "input has no file name".to_string())?;
            dir.join(stem).with_extension("js")
        }
    };

    std::fs::write(&target, &output.code)
        .map_err(|e| format!("cannot write {}: {e}", target.display()))?;
    tracing::info!(from = %input.display(), to = %target.display(), "converted");
    Ok(())
}
