//! Inspeção da instalação do esbuild em `node_modules`

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Conteúdo do diretório `bin` do pacote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinListing {
    Missing,
    /// Nomes das entradas, ordenados
    Files(Vec<String>),
}

/// Resultado de uma inspeção
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsbuildReport {
    pub package_dir: PathBuf,
    pub exists: bool,
    pub bin: BinListing,
    pub install_script: bool,
}

impl EsbuildReport {
    /// Escreve o diagnóstico em formato legível
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Inspecting: {}", self.package_dir.display())?;
        writeln!(out, "Exists: {}", self.exists)?;

        match &self.bin {
            BinListing::Missing => writeln!(out, "Files: missing bin")?,
            BinListing::Files(names) => writeln!(out, "Files: [{}]", names.join(", "))?,
        }

        let install = if self.install_script { "present" } else { "missing" };
        writeln!(out, "Install script: {install}")?;

        Ok(())
    }
}

/// Inspector do pacote `esbuild` de um projeto Node
pub struct EsbuildInspector {
    package_dir: PathBuf,
    bin_dir: PathBuf,
    install_script: PathBuf,
}

impl EsbuildInspector {
    pub fn new(root: &Path) -> Self {
        let package_dir = root.join("node_modules").join("esbuild");

        Self {
            bin_dir: package_dir.join("bin"),
            install_script: package_dir.join("install.js"),
            package_dir,
        }
    }

    /// Verifica o pacote sem modificar nada. Diretórios ausentes não são erro.
    pub fn inspect(&self) -> Result<EsbuildReport> {
        tracing::debug!(dir = %self.package_dir.display(), "inspecionando esbuild");

        let bin = if self.bin_dir.exists() {
            BinListing::Files(self.list_bin()?)
        } else {
            BinListing::Missing
        };

        Ok(EsbuildReport {
            package_dir: self.package_dir.clone(),
            exists: self.package_dir.exists(),
            bin,
            install_script: self.install_script.exists(),
        })
    }

    fn list_bin(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.bin_dir)
            .with_context(|| format!("Falha ao listar '{}'", self.bin_dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("Falha ao ler entrada do diretório bin")?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        tracing::debug!(count = names.len(), "entradas em bin");
        Ok(names)
    }
}

/// Inspeciona `root/node_modules/esbuild` e escreve o relatório em `out`
pub fn inspect_esbuild<W: Write>(root: &Path, out: &mut W) -> Result<EsbuildReport> {
    let report = EsbuildInspector::new(root).inspect()?;
    report.write_to(out)?;
    Ok(report)
}
