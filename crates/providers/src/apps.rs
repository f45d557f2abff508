//! Launching desktop applications by name
//!
//! Names are looked up case-insensitively in the `[apps]` config table; the
//! value is the command line to run.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jarvis::{AppLauncher, CapabilityError, CapabilityResult};

use crate::process;

pub struct ProcessAppLauncher {
    apps: BTreeMap<String, String>,
}

impl ProcessAppLauncher {
    pub fn new(apps: BTreeMap<String, String>) -> Self {
        Self { apps }
    }

    /// Configured entry for `name`, as (display name, command line)
    pub fn resolve(&self, name: &str) -> Option<(&str, &str)> {
        let wanted = name.trim();
        self.apps
            .iter()
            .find(|(app, _)| app.eq_ignore_ascii_case(wanted))
            .map(|(app, command)| (app.as_str(), command.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }
}

/// Split a configured command line with POSIX shell quoting rules
pub fn split_command_line(line: &str) -> CapabilityResult<Vec<String>> {
    shlex::split(line)
        .ok_or_else(|| CapabilityError::failed(format!("Unbalanced quotes in command: {}", line)))
}

#[async_trait]
impl AppLauncher for ProcessAppLauncher {
    async fn launch(&self, name: &str) -> CapabilityResult<String> {
        let Some((app, command)) = self.resolve(name) else {
            tracing::debug!("No application configured for '{}'", name);
            return Ok(format!(
                "I don't know an application called {}. Add it to the apps section of your config.",
                name.trim()
            ));
        };

        let mut parts = split_command_line(command)?.into_iter();
        let program = parts
            .next()
            .ok_or_else(|| CapabilityError::failed(format!("No command configured for {}", app)))?;
        let args: Vec<String> = parts.collect();

        tracing::info!("Launching {} ({})", app, command);
        process::spawn_detached(&program, &args)?;
        Ok(format!("Opening {}.", app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher() -> ProcessAppLauncher {
        ProcessAppLauncher::new(BTreeMap::from([
            ("Visual Studio Code".to_string(), "code".to_string()),
            ("Broken".to_string(), "   ".to_string()),
            ("Half Quoted".to_string(), "builder 'project".to_string()),
        ]))
    }

    #[test]
    fn test_resolve_ignores_case() {
        assert_eq!(
            launcher().resolve("visual studio code"),
            Some(("Visual Studio Code", "code"))
        );
        assert_eq!(launcher().resolve("spotify"), None);
    }

    #[test]
    fn test_split_command_line() {
        assert_eq!(
            split_command_line(r#""C:\Program Files\App\app.exe" --new-window"#).unwrap(),
            vec![r"C:\Program Files\App\app.exe", "--new-window"]
        );
        assert_eq!(split_command_line("  code  .").unwrap(), vec!["code", "."]);
        assert!(split_command_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_command_line_shell_quoting() {
        assert_eq!(
            split_command_line("flatpak run 'org.gnome Builder' --x").unwrap(),
            vec!["flatpak", "run", "org.gnome Builder", "--x"]
        );
        assert_eq!(
            split_command_line(r"/opt/My\ App/bin/app").unwrap(),
            vec!["/opt/My App/bin/app"]
        );
        assert_eq!(split_command_line(r#"code """#).unwrap(), vec!["code", ""]);
    }

    #[test]
    fn test_split_command_line_rejects_unbalanced_quotes() {
        assert!(split_command_line("code 'unterminated").is_err());
    }

    #[tokio::test]
    async fn test_unknown_app_is_explained() {
        let reply = launcher().launch("Spotify").await.unwrap();
        assert!(reply.starts_with("I don't know an application called Spotify."));
    }

    #[tokio::test]
    async fn test_empty_command_fails() {
        assert!(launcher().launch("broken").await.is_err());
    }

    #[tokio::test]
    async fn test_unbalanced_quotes_fail_before_spawning() {
        let err = launcher().launch("half quoted").await.unwrap_err();
        assert!(err.to_string().starts_with("Unbalanced quotes"));
    }
}
