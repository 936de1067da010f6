//! Line-based overwrite prompt

use stampcheck_core::config::display_name;
use stampcheck_core::policy::ConfirmOverwrite;
use std::io::{BufRead, Stdout, StdinLock, Write};
use std::path::Path;

/// Asks on `output` and reads one line from `input`
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<StdinLock<'static>, Stdout> {
    /// Prompt on the terminal
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for PromptConfirm<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> std::io::Result<String> {
        let name = display_name(path);
        write!(
            self.output,
            "'{}' already exists on disk. Would you like to replace '{}'? (Y/n) >> ",
            name, name
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer)
    }
}
