//! Code-generation collaborator interface.
//!
//! The real responder is an external service; this module defines the
//! boundary the core consumes and a deterministic mock that answers with a
//! canned starter project. Generation is fire-and-forget relative to the
//! store: callers decide whether to install the result.

use serde::{Deserialize, Serialize};
use serde_json::json;

use quay_types::error::Result;
use quay_vfs::Vfs;

/// Extra knobs a generation request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalDetails {
    pub framework: String,
    pub database: String,
}

/// One generated file, with inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEntry {
    pub path: String,
    pub content: String,
}

/// The responder's answer: a file set plus setup instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedProject {
    pub files: Vec<GeneratedEntry>,
    pub setup_instructions: Vec<String>,
}

impl GeneratedProject {
    /// Replay every generated file into the store; parent directories are
    /// created as needed.
    pub fn install_into(&self, vfs: &mut dyn Vfs) -> Result<()> {
        for file in &self.files {
            vfs.create_file(&file.path, &file.content)?;
        }
        Ok(())
    }
}

/// A code-generation responder.
pub trait Generator {
    fn generate(&self, prompt: &str, details: &TechnicalDetails) -> Result<GeneratedProject>;
}

/// Deterministic responder returning the canned starter project.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl Generator for MockGenerator {
    fn generate(&self, _prompt: &str, details: &TechnicalDetails) -> Result<GeneratedProject> {
        let mut dependencies = serde_json::Map::new();
        dependencies.insert(details.framework.clone(), json!("latest"));
        dependencies.insert(details.database.clone(), json!("latest"));
        let manifest = json!({
            "name": "generated-project",
            "version": "1.0.0",
            "dependencies": dependencies,
        });

        Ok(GeneratedProject {
            files: vec![
                GeneratedEntry {
                    path: "/src/components/App.jsx".to_string(),
                    content: "import React from 'react';\n\nfunction App() {\n  return <div>Hello World</div>;\n}\n\nexport default App;\n"
                        .to_string(),
                },
                GeneratedEntry {
                    path: "/src/components/Header.jsx".to_string(),
                    content: "import React from 'react';\n\nfunction Header() {\n  return <header>Header Component</header>;\n}\n\nexport default Header;\n"
                        .to_string(),
                },
                GeneratedEntry {
                    path: "/src/utils/api.js".to_string(),
                    content: "export async function fetchData() {\n  // API implementation\n}\n".to_string(),
                },
                GeneratedEntry {
                    path: "/src/index.js".to_string(),
                    content: "import React from 'react';\nimport ReactDOM from 'react-dom';\nimport App from './components/App';\n\nReactDOM.render(<App />, document.getElementById('root'));\n"
                        .to_string(),
                },
                GeneratedEntry {
                    path: "/package.json".to_string(),
                    content: serde_json::to_string_pretty(&manifest)?,
                },
            ],
            setup_instructions: vec![
                "npm install".to_string(),
                "npm start".to_string(),
            ],
        })
    }
}
