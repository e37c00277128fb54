//! Weave command implementation.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{Context, RunPhases};

use super::helpers::{print_reports, run_documents};

/// Options for the weave command.
#[derive(Debug, Clone, Default)]
pub struct WeaveOptions {
    /// Write the chunk graph regardless of configuration.
    pub graph: bool,
    /// Specific documents to weave (empty means all).
    pub files: Vec<PathBuf>,
}

/// Executes the weave command, printing the title report to standard output.
pub fn weave(ctx: &Context, options: WeaveOptions) -> Result<()> {
    let stdout = std::io::stdout();
    weave_to(ctx, options, &mut stdout.lock())
}

/// Executes the weave command, printing the title report to `out`.
pub fn weave_to(ctx: &Context, options: WeaveOptions, out: &mut dyn Write) -> Result<()> {
    tracing::info!("Weaving documents...");

    let phases = RunPhases {
        force_graph: options.graph,
        ..RunPhases::weave()
    };
    let reports = run_documents(ctx, &options.files, phases, &mut std::io::sink())?;
    print_reports(&reports, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = "\
[[main]]
[source,c,output=main.c]
----
<<Body>>
----

[[body-1]]
.Body
[source,c]
----
a();
----

[[body-2]]
.Body
[source,c]
----
b();
----
";

    #[test]
    fn test_weave_report() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("doc.adoc"), DOC).unwrap();

        let mut out = Vec::new();
        weave_to(&ctx, WeaveOptions::default(), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let titles = json[0]["titles"].as_array().unwrap();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0]["id"], "body-1");
        assert_eq!(
            titles[0]["title"],
            "Body [.lp-nav.right]#xref:main[\u{2191} main.c] xref:body-2[next \u{2192}]#"
        );
        assert_eq!(titles[1]["links"][1]["kind"], "prev");

        assert!(!dir.path().join("main.c").exists());
        assert!(!dir.path().join("doc.lp.dot").exists());
    }

    #[test]
    fn test_weave_forced_graph() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("doc.adoc"), DOC).unwrap();

        let options = WeaveOptions {
            graph: true,
            ..Default::default()
        };
        weave_to(&ctx, options, &mut std::io::sink()).unwrap();

        let dot = fs::read_to_string(dir.path().join("doc.lp.dot")).unwrap();
        assert!(dot.starts_with("digraph \"doc\" {"));
        assert!(dot.contains("c0:all -> c1:b0;"));
    }
}
