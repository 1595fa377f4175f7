//! Generate command implementation.

use crate::generator::GeneratorPolicy;
use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;

/// Command to generate a password locally.
pub struct GenerateCommand;

impl GenerateCommand {
    /// Applies the command-line options to `base`.
    fn policy_from_args(args: &[&str], base: GeneratorPolicy) -> Result<GeneratorPolicy, String> {
        let mut policy = base;
        for arg in args {
            match *arg {
                "--no-upper" => policy.include_uppercase = false,
                "--upper" => policy.include_uppercase = true,
                "--no-numbers" => policy.include_numbers = false,
                "--numbers" => policy.include_numbers = true,
                "--no-symbols" => policy.include_symbols = false,
                "--symbols" => policy.include_symbols = true,
                other => {
                    policy.length = other
                        .parse()
                        .map_err(|_| format!("Unknown option or length: '{}'", other))?;
                }
            }
        }
        Ok(policy)
    }
}

impl Command for GenerateCommand {
    fn name(&self) -> &str {
        "generate"
    }

    fn aliases(&self) -> &[&str] {
        &["gen", "g"]
    }

    fn description(&self) -> &str {
        "Generate a random password"
    }

    fn usage(&self) -> &str {
        "generate [length] [--no-upper] [--no-numbers] [--no-symbols]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Generator
    }

    fn help(&self) -> &str {
        "Generate a random password and show its strength.\n\n\
         Lowercase letters are always used. The options change the\n\
         generator settings for this and later calls; use --upper,\n\
         --numbers or --symbols to switch a class back on.\n\n\
         Arguments:\n  \
           [length] - Between 8 and 32 (default 12)\n\n\
         Examples:\n  \
           generate\n  \
           generate 20 --no-symbols"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let policy = match Self::policy_from_args(args, *ctx.state.panel.policy()) {
            Ok(p) => p,
            Err(e) => return CommandResult::error(format!("{}\nUsage: {}", e, self.usage())),
        };
        if let Err(e) = policy.validate() {
            return CommandResult::error(e.to_string());
        }
        ctx.state.panel.set_policy(policy);

        match ctx.state.panel.generate() {
            Ok(generated) => {
                log::info!("Generated a {} character password", policy.length);
                CommandResult::success(format!(
                    "{}\nStrength: {}",
                    generated.value,
                    OutputHighlighter::strength(generated.strength)
                ))
            }
            Err(e) => {
                log::warn!("Password generation failed: {}", e);
                CommandResult::error(e.to_string())
            }
        }
    }
}
