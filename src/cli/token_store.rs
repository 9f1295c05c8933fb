use std::fs;
use std::path::PathBuf;

use anyhow::Context;

/// File-backed storage for the bearer token, so a sign-in survives between
/// CLI invocations.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// `$TASKPAD_HOME/token`, falling back to `$HOME/.taskpad/token`.
    pub fn default_location() -> anyhow::Result<Self> {
        let dir = match std::env::var("TASKPAD_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                let home = std::env::var("HOME").context("HOME is not set")?;
                PathBuf::from(home).join(".taskpad")
            }
        };
        Ok(Self {
            path: dir.join("token"),
        })
    }

    pub fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    pub fn save(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in_tempdir(name: &str) -> TokenStore {
        let dir = std::env::temp_dir().join(format!("taskpad-test-{}-{}", name, std::process::id()));
        TokenStore {
            path: dir.join("token"),
        }
    }

    #[test]
    fn save_load_clear_round_trip() {
        let store = store_in_tempdir("round-trip");
        assert!(store.load().is_none());

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }
}
