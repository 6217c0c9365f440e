//! [`StubRunner`]: a scripted [`CommandRunner`] for tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

use regex::Regex;
use scfg_run::{CommandError, CommandRunner, Error, ExitFailure, Result};

#[derive(Debug)]
enum Outcome {
    Success { stdout: String },
    Failure { exit_code: i32, stderr: String },
}

#[derive(Debug)]
struct Stub {
    pattern: Regex,
    outcome: Outcome,
    matched: bool,
}

/// Answers subprocess calls from registered stubs instead of running anything.
///
/// Each stub is a regular expression matched against the space-joined argv
/// (`"apt install -y curl=8.0"`) and answers exactly one call. A call that no
/// remaining stub matches panics.
///
/// # Example
///
/// ```rust
/// use scfg_run::CommandRunner;
/// use scfg_test_utils::StubRunner;
///
/// let runner = StubRunner::new();
/// runner.register("apt list --installed", "curl/now 8.0 amd64 [installed]\n");
/// runner.mark_found("apt");
///
/// let out = runner.output("apt", &["list".into(), "--installed".into()]).unwrap();
/// assert!(out.starts_with("curl/now"));
/// assert!(runner.find("apt").is_ok());
/// ```
#[derive(Debug, Default)]
pub struct StubRunner {
    stubs: RefCell<Vec<Stub>>,
    found: RefCell<HashSet<String>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, pattern: &str, outcome: Outcome) {
        assert!(!pattern.is_empty(), "cannot use an empty stub pattern");
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid stub pattern `{}`: {}", pattern, e));
        self.stubs.borrow_mut().push(Stub {
            pattern,
            outcome,
            matched: false,
        });
    }

    /// Register a successful call that prints `stdout`.
    pub fn register(&self, pattern: &str, stdout: &str) {
        self.push(
            pattern,
            Outcome::Success {
                stdout: stdout.to_string(),
            },
        );
    }

    /// Register a call that exits with `exit_code` after writing `stderr`.
    pub fn register_error(&self, pattern: &str, exit_code: i32, stderr: &str) {
        self.push(
            pattern,
            Outcome::Failure {
                exit_code,
                stderr: stderr.to_string(),
            },
        );
    }

    /// Make `find(name)` succeed.
    pub fn mark_found(&self, name: &str) {
        self.found.borrow_mut().insert(name.to_string());
    }

    /// Every argv seen so far, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Every call so far, each joined into one line.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|argv| argv.join(" ")).collect()
    }

    /// Patterns of stubs that were never called.
    pub fn unmatched(&self) -> Vec<String> {
        self.stubs
            .borrow()
            .iter()
            .filter(|s| !s.matched)
            .map(|s| s.pattern.as_str().to_string())
            .collect()
    }

    /// Panic if any registered stub was never called.
    pub fn assert_all_matched(&self) {
        let unmatched = self.unmatched();
        assert!(
            unmatched.is_empty(),
            "unmatched stubs ({}):\n{}",
            unmatched.len(),
            unmatched.join("\n")
        );
    }

    fn answer(&self, program: &str, args: &[String]) -> Result<String> {
        let argv: Vec<String> = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect();
        let line = argv.join(" ");
        self.calls.borrow_mut().push(argv.clone());

        let mut stubs = self.stubs.borrow_mut();
        let stub = stubs
            .iter_mut()
            .find(|s| !s.matched && s.pattern.is_match(&line))
            .unwrap_or_else(|| panic!("no command stub for `{}`", line));
        stub.matched = true;

        match &stub.outcome {
            Outcome::Success { stdout } => Ok(stdout.clone()),
            Outcome::Failure { exit_code, stderr } => Err(CommandError::new(
                argv,
                ExitFailure::Status(Some(*exit_code)),
                stderr.clone(),
            )
            .into()),
        }
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        self.answer(program, args).map(|_| ())
    }

    fn output(&self, program: &str, args: &[String]) -> Result<String> {
        self.answer(program, args)
    }

    fn find(&self, name: &str) -> Result<PathBuf> {
        if self.found.borrow().contains(name) {
            Ok(PathBuf::from("/usr/bin").join(name))
        } else {
            Err(Error::NotFound {
                name: name.to_string(),
            })
        }
    }
}
