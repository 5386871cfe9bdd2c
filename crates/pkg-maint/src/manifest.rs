//! Patch de `package.json`: sobrescreve o script de `postinstall`

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Comando que substitui o `prisma generate` do postinstall
pub const SKIP_PRISMA_POSTINSTALL: &str = "echo skip prisma generate";

/// Manifest de pacote tratado como objeto JSON sem tipo
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    root: Map<String, Value>,
}

impl PackageManifest {
    /// Lê e parseia o manifest. Nada é escrito se falhar.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler manifest '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("Manifest inválido em '{}'", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(root) => Ok(Self { root }),
            other => anyhow::bail!(
                "Manifest deve ser um objeto JSON, encontrado: {}",
                json_kind(&other)
            ),
        }
    }

    /// Garante o objeto `scripts` e define `scripts.postinstall`
    pub fn set_postinstall(&mut self, command: &str) -> Result<()> {
        let scripts = self
            .root
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        match scripts {
            Value::Object(scripts) => {
                scripts.insert("postinstall".to_string(), Value::String(command.to_string()));
                Ok(())
            }
            other => anyhow::bail!(
                "Campo 'scripts' deve ser um objeto, encontrado: {}",
                json_kind(other)
            ),
        }
    }

    pub fn postinstall(&self) -> Option<&str> {
        self.root.get("scripts")?.get("postinstall")?.as_str()
    }

    /// Salva com indentação de 2 espaços, sobrescrevendo o arquivo
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.root)
            .context("Falha ao serializar manifest")?;

        fs::write(path, json)
            .with_context(|| format!("Falha ao escrever manifest '{}'", path.display()))?;

        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Desativa o `prisma generate` no postinstall do manifest em `path`
pub fn skip_postinstall(path: &Path) -> Result<()> {
    let mut manifest = PackageManifest::load(path)?;
    tracing::debug!(path = %path.display(), "manifest carregado");

    if let Some(previous) = manifest.postinstall() {
        tracing::info!(previous, "postinstall existente será sobrescrito");
    }

    manifest.set_postinstall(SKIP_PRISMA_POSTINSTALL)?;
    manifest.save(path)?;

    tracing::info!(
        path = %path.display(),
        postinstall = SKIP_PRISMA_POSTINSTALL,
        "manifest atualizado"
    );
    Ok(())
}
