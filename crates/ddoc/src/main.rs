#![forbid(unsafe_code)]

//! ddoc CLI: convert DigiDoc DataFiles between embedded and hashcode form.

use clap::{ArgAction, Parser, Subcommand};
use ddoc::transforms::{self, UserFile, DEFAULT_ID};
use ddoc::{BlobStore, DdocConfig, Error, Scope};
use ddoc_core::ContainerHeader;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(
    name = "ddoc",
    about = "DigiDoc DataFile hashcode/embedded converter",
    version
)]
struct Cli {
    /// Configuration file (default: ./ddoc.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace embedded DataFiles with their hashcode form
    ToHashcode {
        /// Container file
        file: PathBuf,

        /// Session or request token the originals are stored under
        #[arg(short, long)]
        scope: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore hashcode DataFiles from stored originals
    ToEmbedded {
        /// Container file
        file: PathBuf,

        /// Session or request token the originals were stored under
        #[arg(short, long)]
        scope: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a new DataFile from a file and print its hashcode descriptor
    AddFile {
        /// File to add
        file: PathBuf,

        /// Session or request token to store the DataFile under
        #[arg(short, long)]
        scope: String,

        /// DataFile Id
        #[arg(long, default_value = DEFAULT_ID)]
        id: String,

        /// MIME type of the file
        #[arg(long = "mime-type", default_value = "application/octet-stream")]
        mime_type: String,

        /// Container whose format and version the DataFile is built for
        /// (default: a new DIGIDOC-XML 1.3 container)
        #[arg(long)]
        container: Option<PathBuf>,
    },

    /// Print declared and computed digests of every DataFile
    Digest {
        /// Container file
        file: PathBuf,
    },

    /// Show container format, version and DataFiles
    Info {
        /// Container file
        file: PathBuf,
    },

    /// Remove all stored originals of a scope
    Clean {
        #[arg(short, long)]
        scope: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::ToHashcode {
            file,
            scope,
            output,
        } => cmd_to_hashcode(cli.config.as_deref(), &file, &scope, output),
        Commands::ToEmbedded {
            file,
            scope,
            output,
        } => cmd_to_embedded(cli.config.as_deref(), &file, &scope, output),
        Commands::AddFile {
            file,
            scope,
            id,
            mime_type,
            container,
        } => cmd_add_file(cli.config.as_deref(), &file, &scope, &id, mime_type, container),
        Commands::Digest { file } => cmd_digest(&file),
        Commands::Info { file } => cmd_info(&file),
        Commands::Clean { scope } => cmd_clean(cli.config.as_deref(), &scope),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_to_hashcode(
    config: Option<&Path>,
    file: &Path,
    scope: &str,
    output: Option<PathBuf>,
) -> Result<(), Error> {
    let ctx = DdocConfig::load_or_default(config)?.transform_context()?;
    let scope = Scope::new(scope)?;
    let xml = read_file(file)?;
    let out = transforms::to_hashcode(&ctx, &xml, &scope)?;
    write_output(output, out.as_bytes())
}

fn cmd_to_embedded(
    config: Option<&Path>,
    file: &Path,
    scope: &str,
    output: Option<PathBuf>,
) -> Result<(), Error> {
    let ctx = DdocConfig::load_or_default(config)?.transform_context()?;
    let scope = Scope::new(scope)?;
    let xml = read_file(file)?;
    let out = transforms::to_embedded(&ctx, &xml, &scope)?;
    write_output(output, out.as_bytes())
}

fn cmd_add_file(
    config: Option<&Path>,
    file: &Path,
    scope: &str,
    id: &str,
    mime_type: String,
    container: Option<PathBuf>,
) -> Result<(), Error> {
    let ctx = DdocConfig::load_or_default(config)?.transform_context()?;
    let scope = Scope::new(scope)?;
    let header = match container {
        Some(path) => ddoc_xml::detect(&read_file(&path)?),
        None => ContainerHeader::digidoc_13(),
    };
    let content =
        std::fs::read(file).map_err(|e| Error::Other(format!("{}: {e}", file.display())))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Other(format!("{}: not a file name", file.display())))?;

    let user_file = UserFile {
        name,
        mime_type,
        content,
    };
    let desc = transforms::build_data_file(&ctx, &header, &user_file, id, &scope)?;
    println!("Id:           {}", desc.id);
    println!("Filename:     {}", desc.filename);
    println!("MimeType:     {}", desc.mime_type);
    println!("ContentType:  {}", desc.content_type);
    println!("Size:         {}", desc.size);
    println!("DigestType:   {}", desc.digest_type);
    println!("DigestValue:  {}", desc.digest_value);
    Ok(())
}

fn cmd_digest(file: &Path) -> Result<(), Error> {
    let xml = read_file(file)?;
    for entry in transforms::digest_report(&xml) {
        print!(
            "{}\t{}\t{}\tdeclared={}\tcomputed={}",
            entry.id.as_deref().unwrap_or("-"),
            entry.content_type.as_deref().unwrap_or("-"),
            entry.digest_type,
            entry.declared_digest.as_deref().unwrap_or("-"),
            entry.computed_digest.as_deref().unwrap_or("-"),
        );
        match entry.problem {
            Some(problem) => println!("\terror={problem}"),
            None => println!(),
        }
    }
    Ok(())
}

fn cmd_info(file: &Path) -> Result<(), Error> {
    let xml = read_file(file)?;
    let header = ddoc_xml::detect(&xml);
    let spans = ddoc_xml::locate_data_files(&xml);
    println!("Container:    {header}");
    println!("Namespace:    {}", header.namespace.as_deref().unwrap_or("-"));
    println!("Policy:       {:?}", header.policy());
    println!("DataFiles:    {}", spans.len());
    for span in &spans {
        match ddoc_xml::parse_attributes(span.text(&xml)) {
            Ok(attrs) => println!(
                "  {}  {}  {}  {}",
                attrs.element,
                attrs.id().unwrap_or("-"),
                attrs.content_type().unwrap_or("-"),
                attrs.get("Filename").unwrap_or("-"),
            ),
            Err(e) => println!("  <unparsable at byte {}: {e}>", span.start),
        }
    }
    Ok(())
}

fn cmd_clean(config: Option<&Path>, scope: &str) -> Result<(), Error> {
    let config = DdocConfig::load_or_default(config)?;
    let store = ddoc::FileBlobStore::open(&config.work_dir)?;
    let removed = store.remove_scope(&Scope::new(scope)?)?;
    println!("removed {removed} stored DataFile(s)");
    Ok(())
}

// ── Utility functions ────────────────────────────────────────────────

fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| Error::Other(format!("{}: {e}", path.display())))
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(p) => {
            std::fs::write(&p, data).map_err(|e| Error::Other(format!("{}: {e}", p.display())))
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(data)
                .map_err(|e| Error::Other(format!("stdout: {e}")))
        }
    }
}
