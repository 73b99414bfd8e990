//! Simulated package-manager and runtime commands.
//!
//! Deterministic canned transcripts keyed by `(tool, subcommand)`. Nothing
//! here touches the store or the network; the terminal just stays
//! responsive without a real toolchain behind it.

use quay_types::error::Result;

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Reported by `node --version`.
const NODE_VERSION: &str = "v16.14.0";

const NPM_SUBCOMMANDS: [&str; 5] = ["install", "start", "build", "test", "run"];

/// Respond to an `npm` invocation.
pub fn npm(args: &[&str]) -> String {
    let Some(sub) = args.first() else {
        return "Usage: npm <command>\n\nAvailable commands: install, start, build, test, run"
            .to_string();
    };
    if !NPM_SUBCOMMANDS.contains(sub) {
        return format!("Unknown npm command: {sub}");
    }
    match *sub {
        "install" => install(&args[1..]),
        "start" => "Starting the development server...\nCompiling...\nCompiled successfully!\nYou can now view the app in the browser.".to_string(),
        "build" => "Creating an optimized production build...\nCompiled successfully.\nThe build folder is ready to be deployed.".to_string(),
        "test" => "Running tests...\nPassed all tests!".to_string(),
        // "run"
        _ => match args.get(1) {
            Some(script) => format!("Running script \"{script}\"...\nExecuted successfully!"),
            None => "Please specify a script to run".to_string(),
        },
    }
}

fn install(packages: &[&str]) -> String {
    if packages.is_empty() {
        return "Installing dependencies from package.json...\nDone!".to_string();
    }
    let mut lines = vec!["Installing packages...".to_string()];
    lines.extend(packages.iter().map(|pkg| format!("+ {pkg}@latest")));
    lines.push("Done!".to_string());
    lines.push(String::new());
    lines.push("Dependencies installed successfully!".to_string());
    lines.join("\n")
}

/// Respond to a `node` invocation.
pub fn node(args: &[&str]) -> String {
    let Some(sub) = args.first() else {
        return "Usage: node [options] [ script.js ] [arguments]".to_string();
    };
    if *sub == "--version" || *sub == "-v" {
        return NODE_VERSION.to_string();
    }
    if sub.ends_with(".js") {
        return format!("Executing {sub}...\nExecution complete!");
    }
    format!("Unknown node command or file: {sub}")
}

/// Respond to a `react-scripts` invocation.
pub fn react_scripts(args: &[&str]) -> String {
    let Some(sub) = args.first() else {
        return "Usage: react-scripts <command>".to_string();
    };
    match *sub {
        "start" => "Starting the development server...\nCompiled successfully!\nYou can now view the app in the browser.".to_string(),
        "build" => "Creating an optimized production build...\nCompiled successfully.\nThe build folder is ready to be deployed.".to_string(),
        "test" => "Running tests...\nPassed all tests!".to_string(),
        "eject" => "Ejecting...\nNote: this is a one-way operation. Once you eject, you can't go back!\nAre you sure you want to eject? This action is permanent.".to_string(),
        _ => format!("Unknown react-scripts command: {sub}"),
    }
}

// ---------------------------------------------------------------------------
// registry wrappers
// ---------------------------------------------------------------------------

struct NpmCmd;
impl Command for NpmCmd {
    fn name(&self) -> &str {
        "npm"
    }
    fn description(&self) -> &str {
        "Run npm commands (install, start, build, test)"
    }
    fn usage(&self) -> &str {
        "npm <cmd>"
    }
    fn category(&self) -> &str {
        "toolchain"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(npm(args)))
    }
}

struct NodeCmd;
impl Command for NodeCmd {
    fn name(&self) -> &str {
        "node"
    }
    fn description(&self) -> &str {
        "Execute a Node.js script"
    }
    fn usage(&self) -> &str {
        "node <file>"
    }
    fn category(&self) -> &str {
        "toolchain"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(node(args)))
    }
}

struct ReactScriptsCmd;
impl Command for ReactScriptsCmd {
    fn name(&self) -> &str {
        "react-scripts"
    }
    fn description(&self) -> &str {
        "Run React commands (start, build, test)"
    }
    fn usage(&self) -> &str {
        "react-scripts <cmd>"
    }
    fn category(&self) -> &str {
        "toolchain"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(react_scripts(args)))
    }
}

/// Register the simulated toolchain commands.
pub fn register_toolchain_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(NpmCmd));
    reg.register(Box::new(NodeCmd));
    reg.register(Box::new(ReactScriptsCmd));
}
