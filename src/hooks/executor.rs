use std::process::Command;

use crate::error::{AutoVersionError, Result};
use crate::hooks::HookContext;

/// Executes configured hook commands
pub struct HookExecutor;

impl HookExecutor {
    /// Run a hook command through the shell with the context exported as
    /// environment variables. A non-zero exit status fails the hook and
    /// aborts the remaining workflow steps.
    pub fn execute(command: &str, context: &HookContext) -> Result<()> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);

        for (key, value) in context.to_env_vars() {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| {
            AutoVersionError::hook(format!(
                "failed to run {} hook '{}': {}",
                context.hook_type.name(),
                command,
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AutoVersionError::hook(format!(
                "{} hook '{}' exited with code {}{}",
                context.hook_type.name(),
                command,
                output.status.code().unwrap_or(-1),
                if stderr.trim().is_empty() {
                    String::new()
                } else {
                    format!(": {}", stderr.trim())
                }
            )));
        }

        Ok(())
    }
}
