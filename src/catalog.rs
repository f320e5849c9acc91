use std::{fs, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::tariff::{Tariff, TariffId, TariffPatch},
    prelude::*,
};

/// File format, derived from the file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(extension) if extension.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => bail!("expected a `.toml` or `.json` file, got `{}`", path.display()),
        }
    }
}

/// List of tariffs to compare.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[must_use]
pub struct Catalog {
    #[serde(default, alias = "tarife")]
    pub tariffs: Vec<Tariff>,
}

impl From<Vec<Tariff>> for Catalog {
    fn from(tariffs: Vec<Tariff>) -> Self {
        Self { tariffs }
    }
}

impl Catalog {
    /// Read, parse, and validate the catalog.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let catalog = Self::parse(&text, format)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        catalog.validate()?;
        info!(n_tariffs = catalog.tariffs.len(), "loaded the tariffs");
        Ok(catalog)
    }

    /// Same as [`Catalog::read`], but a missing file is an empty catalog.
    pub fn read_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::read(path)
        } else {
            info!(path = %path.display(), "starting a new catalog");
            Ok(Self::default())
        }
    }

    pub fn parse(text: &str, format: Format) -> Result<Self> {
        match format {
            Format::Toml => Ok(toml::from_str(text)?),
            // Exports are either a bare array of tariffs, or an object with the tariff array:
            Format::Json if text.trim_start().starts_with('[') => {
                Ok(Self::from(serde_json::from_str::<Vec<Tariff>>(text)?))
            }
            Format::Json => Ok(serde_json::from_str(text)?),
        }
    }

    /// Render the catalog in the given format.
    pub fn render(&self, format: Format) -> Result<String> {
        match format {
            Format::Toml => Ok(toml::to_string_pretty(self)?),
            Format::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Write the catalog, choosing the format by the path extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write(&self, path: impl AsRef<Path>) -> Result {
        let path = path.as_ref();
        let text = self.render(Format::from_path(path)?)?;
        fs::write(path, text).with_context(|| format!("failed to write `{}`", path.display()))?;
        info!(n_tariffs = self.tariffs.len(), "saved the tariffs");
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &TariffId) -> Option<&Tariff> {
        self.tariffs.iter().find(|tariff| &tariff.id == id)
    }

    /// Derive an unused identifier from the tariff name: `Öko Plus` becomes `öko-plus`,
    /// then `öko-plus-2` and so on.
    pub fn generate_id(&self, name: &str) -> TariffId {
        let slug = name
            .split(|character: char| !character.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .join("-");
        let base = if slug.is_empty() { String::from("tariff") } else { slug };
        let mut id = TariffId::from(base.clone());
        let mut suffix = 1;
        while self.get(&id).is_some() {
            suffix += 1;
            id = TariffId::from(format!("{base}-{suffix}"));
        }
        id
    }

    /// Append a tariff. An empty identifier is replaced with a generated one.
    #[instrument(skip_all, fields(name = %tariff.name))]
    pub fn add(&mut self, mut tariff: Tariff) -> Result<TariffId> {
        if tariff.id.as_str().is_empty() {
            tariff.id = self.generate_id(&tariff.name);
        }
        tariff.validate().with_context(|| format!("invalid tariff `{}`", tariff.id))?;
        ensure!(self.get(&tariff.id).is_none(), "duplicate tariff id `{}`", tariff.id);
        info!(id = %tariff.id, "added");
        let id = tariff.id.clone();
        self.tariffs.push(tariff);
        Ok(id)
    }

    /// Apply the patch to the tariff. The catalog is left untouched if the result is invalid.
    #[instrument(skip_all, fields(id = %id))]
    pub fn update(&mut self, id: &TariffId, patch: TariffPatch) -> Result {
        let tariff = self
            .tariffs
            .iter_mut()
            .find(|tariff| &tariff.id == id)
            .with_context(|| format!("tariff `{id}` is not found"))?;
        let mut updated = tariff.clone();
        patch.apply_to(&mut updated);
        updated.validate().with_context(|| format!("invalid update of tariff `{id}`"))?;
        *tariff = updated;
        info!("updated");
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id))]
    pub fn remove(&mut self, id: &TariffId) -> Result<Tariff> {
        let index = self
            .tariffs
            .iter()
            .position(|tariff| &tariff.id == id)
            .with_context(|| format!("tariff `{id}` is not found"))?;
        info!("removed");
        Ok(self.tariffs.remove(index))
    }

    /// Remove all the tariffs and return how many there were.
    pub fn clear(&mut self) -> usize {
        let n_tariffs = self.tariffs.len();
        self.tariffs.clear();
        info!(n_tariffs, "cleared");
        n_tariffs
    }

    /// Validate every tariff, rejecting the whole catalog on the first invalid one.
    pub fn validate(&self) -> Result {
        for (index, tariff) in self.tariffs.iter().enumerate() {
            tariff
                .validate()
                .with_context(|| format!("invalid tariff #{} (`{}`)", index + 1, tariff.id))?;
        }
        if let Some(id) = self.tariffs.iter().map(|tariff| &tariff.id).duplicates().next() {
            bail!("duplicate tariff id `{id}`");
        }
        Ok(())
    }
}
