//! Pluggable evaluation of executable module files
//!
//! Reading a module means running code. Nothing is evaluated unless the
//! caller installs a [`ModuleLoader`] on [`Files`](crate::Files), and a
//! loader only sees the extensions it claims. Callers must only point a
//! loader at files they trust.

use extras_exec::{CommandRunner, Output, SpawnOptions, SystemRunner};
use extras_value::Value;

use crate::{Error, NormalizedPath, Result};

/// Evaluates module files into values.
pub trait ModuleLoader: Send + Sync {
    /// Whether files with `extension` are modules for this loader.
    fn handles(&self, extension: &str) -> bool;

    /// Evaluate the module at `path` and return its exported value.
    fn load(&self, path: &NormalizedPath) -> Result<Value>;
}

/// Loader that runs an external interpreter and reads JSON from its stdout.
///
/// The module path is appended as the last argument. For Node.js:
///
/// ```no_run
/// use extras_fs::{Files, InterpreterLoader};
///
/// let loader = InterpreterLoader::new("node", ["js", "cjs"]).with_args([
///     "-e",
///     "process.stdout.write(JSON.stringify(require(require('path').resolve(process.argv[1]))))",
/// ]);
/// let files = Files::new()?.with_loader(loader);
/// let exported = files.read_document("config.js")?;
/// # Ok::<(), extras_fs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct InterpreterLoader<R = SystemRunner> {
    program: String,
    args: Vec<String>,
    extensions: Vec<String>,
    runner: R,
}

impl InterpreterLoader<SystemRunner> {
    pub fn new<I, S>(program: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: Vec::new(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            runner: SystemRunner,
        }
    }
}

impl<R> InterpreterLoader<R> {
    /// Arguments placed before the module path.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_runner<T>(self, runner: T) -> InterpreterLoader<T> {
        InterpreterLoader {
            program: self.program,
            args: self.args,
            extensions: self.extensions,
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl<R> ModuleLoader for InterpreterLoader<R>
where
    R: CommandRunner + Send + Sync,
{
    fn handles(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    fn load(&self, path: &NormalizedPath) -> Result<Value> {
        let module_error = |message: String| Error::Module {
            path: path.to_native(),
            message,
        };

        let native = path.to_native();
        let module = native.to_string_lossy();
        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(&module);

        tracing::debug!(program = %self.program, module = %path, "Evaluating module");
        let output = self
            .runner
            .spawn(&self.program, &args, &SpawnOptions::silent())
            .and_then(Output::into_result)
            .map_err(|e| module_error(e.to_string()))?;

        serde_json::from_str(output.stdout.trim())
            .map_err(|e| module_error(format!("interpreter output is not JSON: {e}")))
    }
}
