mod inspector;
mod manifest;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_PROJECT_ROOT: &str = "/Users/a81808/Desktop/meal-log-app-new";
const DEFAULT_SERVER_MANIFEST: &str =
    "/Users/a81808/Desktop/meal-log-app-new/apps/server/package.json";

#[derive(Debug, Parser)]
#[command(
    name = "pkg-maint",
    about = "Manutenção local do projeto Node: patch de package.json e inspeção do esbuild"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sobrescreve scripts.postinstall para pular o `prisma generate`
    SkipPostinstall {
        /// Caminho do package.json a ser alterado
        #[arg(long, env = "PKG_MAINT_MANIFEST", default_value = DEFAULT_SERVER_MANIFEST)]
        manifest: PathBuf,
    },

    /// Mostra o estado de node_modules/esbuild
    InspectEsbuild {
        /// Raiz do projeto (onde fica node_modules)
        #[arg(long, env = "PKG_MAINT_ROOT", default_value = DEFAULT_PROJECT_ROOT)]
        root: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout fica reservado para o relatório
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    match args.command {
        Command::SkipPostinstall { manifest } => crate::manifest::skip_postinstall(&manifest)?,
        Command::InspectEsbuild { root } => {
            let stdout = io::stdout();
            crate::inspector::inspect_esbuild(&root, &mut stdout.lock())?;
        }
    }

    Ok(())
}
