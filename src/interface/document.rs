//! Document orchestrator for tangle and weave runs.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Config, ConfigUpdate};
use crate::errors::Result;
use crate::io::{Destination, OutputRouter};
use crate::model::{graph_file_name, weave, write_graph, Block, ChunkDb, Tangler, TitleUpdate};
use crate::readers::{parse_asciidoc, ParsedDocument};

use super::context::Context;

/// A document being processed by litweave.
#[derive(Debug)]
pub struct Document {
    /// Path to the source AsciiDoc file.
    pub path: PathBuf,
    /// Parsed document content.
    pub parsed: ParsedDocument,
    /// Run configuration with the document's attribute overrides applied.
    pub config: Config,
}

impl Document {
    /// Loads a document from a file.
    pub fn load(path: &Path, ctx: &Context) -> Result<Self> {
        let full_path = ctx.resolve_path(path);
        let content = fs::read_to_string(&full_path)?;
        Self::from_source(full_path, &content, ctx)
    }

    /// Builds a document from already loaded text.
    pub fn from_source(path: PathBuf, content: &str, ctx: &Context) -> Result<Self> {
        let parsed = parse_asciidoc(content, Some(&path))?;
        let config = ConfigUpdate::from_attributes(&ctx.config.attribute_prefix, &parsed.attributes)
            .merge_into(&ctx.config);

        Ok(Self {
            path,
            parsed,
            config,
        })
    }

    /// Returns the listing blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.parsed.blocks
    }

    /// File stem, used to name per-document artifacts.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }

    /// Directory tangled files and the graph are written to.
    pub fn output_dir(&self) -> PathBuf {
        let doc_dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        self.config.output_dir_for(doc_dir)
    }

    /// Builds the chunk database of this document.
    pub fn chunk_db(&mut self) -> Result<ChunkDb> {
        ChunkDb::build(&mut self.parsed.blocks)
    }
}

/// Which phases of a run to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPhases {
    /// Write root chunks to their destinations.
    pub tangle: bool,
    /// Rewrite block titles with navigation links.
    pub weave: bool,
    /// Write the dependency graph even if the configuration does not ask for it.
    pub force_graph: bool,
}

impl RunPhases {
    /// Tangle only.
    pub fn tangle() -> Self {
        Self {
            tangle: true,
            weave: false,
            force_graph: false,
        }
    }

    /// Weave only.
    pub fn weave() -> Self {
        Self {
            tangle: false,
            weave: true,
            force_graph: false,
        }
    }

    /// Tangle, then weave.
    pub fn all() -> Self {
        Self {
            tangle: true,
            weave: true,
            force_graph: false,
        }
    }
}

/// What a run over one document produced.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Source document.
    pub document: PathBuf,
    /// Destinations of tangled roots, in root declaration order.
    #[serde(skip)]
    pub written: Vec<Destination>,
    /// Block titles rewritten by weaving.
    pub titles: Vec<TitleUpdate>,
    /// The graph file, if one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<PathBuf>,
}

/// Runs the requested phases over one document.
///
/// Tangling happens before weaving. Roots routed to the primary stream are
/// written to `primary`.
pub fn process_document(
    doc: &mut Document,
    phases: RunPhases,
    primary: &mut dyn Write,
) -> Result<RunReport> {
    tracing::debug!("Processing {}", doc.path.display());
    let db = doc.chunk_db()?;
    tracing::debug!(
        "{} roots and {} chunks in {}",
        db.root_count(),
        db.chunk_count(),
        doc.path.display()
    );

    let mut report = RunReport {
        document: doc.path.clone(),
        ..Default::default()
    };

    if phases.tangle {
        report.written = tangle_document(doc, &db, primary)?;
    }

    if phases.weave {
        report.titles = weave(&db, &mut doc.parsed.blocks);
        if phases.force_graph || doc.config.graph {
            report.graph = Some(write_document_graph(doc, &db)?);
        }
    }

    Ok(report)
}

/// Expands every root of `db` and hands it to the output router.
///
/// Each root is expanded into memory first, so a failing root never
/// leaves a partial file behind.
pub fn tangle_document(
    doc: &Document,
    db: &ChunkDb,
    primary: &mut dyn Write,
) -> Result<Vec<Destination>> {
    let router = OutputRouter::new(doc.output_dir(), db.root_names(), doc.config.file_map())?;
    let tangler = Tangler::new(db, &doc.config.line_templates);

    let mut written = Vec::new();
    for root in db.root_names() {
        let mut buffer = Vec::new();
        tangler.tangle_root(root, &mut buffer)?;
        written.push(router.write(root, &buffer, primary)?);
    }
    Ok(written)
}

/// Writes the chunk graph next to the tangled files.
pub fn write_document_graph(doc: &Document, db: &ChunkDb) -> Result<PathBuf> {
    let stem = doc.stem();
    let dir = doc.output_dir();
    fs::create_dir_all(&dir)?;

    let path = dir.join(graph_file_name(&stem));
    let mut file = File::create(&path)?;
    write_graph(db, &stem, &mut file)?;
    tracing::info!("Wrote chunk graph {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceBlock;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const HELLO: &str = "\
= Hello
:literate-programming-linedir:

[source,c,output=hello.c]
----
int main() {
    <<Print a greeting>>
}
----

.Print...
[source,c]
----
puts(\"hello\");
----
";

    fn setup(content: &str) -> (tempfile::TempDir, Context, PathBuf) {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let path = dir.path().join("hello.adoc");
        fs::write(&path, content).unwrap();
        (dir, ctx, path)
    }

    #[test]
    fn test_tangle_writes_roots() {
        let (dir, ctx, path) = setup(HELLO);
        let mut doc = Document::load(&path, &ctx).unwrap();

        let mut stdout = Vec::new();
        let report = process_document(&mut doc, RunPhases::tangle(), &mut stdout).unwrap();

        assert_eq!(
            report.written,
            vec![Destination::File(dir.path().join("./hello.c"))]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("hello.c")).unwrap(),
            "int main() {\n    puts(\"hello\");\n}\n"
        );
        assert!(stdout.is_empty());
        assert!(report.titles.is_empty());
    }

    #[test]
    fn test_attribute_overrides() {
        let content = HELLO.replace(
            ":literate-programming-linedir:",
            ":literate-programming-linedir:\n:literate-programming-outdir: build\n:literate-programming-file-map: hello.c>*",
        );
        let (dir, ctx, path) = setup(&content);
        let mut doc = Document::load(&path, &ctx).unwrap();
        assert_eq!(doc.output_dir(), dir.path().join("build"));

        let mut stdout = Vec::new();
        let report = process_document(&mut doc, RunPhases::tangle(), &mut stdout).unwrap();

        assert_eq!(report.written, vec![Destination::Primary]);
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            "int main() {\n    puts(\"hello\");\n}\n"
        );
        assert!(!dir.path().join("build/hello.c").exists());
    }

    #[test]
    fn test_position_directives_by_default() {
        let content = HELLO.replace(":literate-programming-linedir:\n", "");
        let (dir, ctx, path) = setup(&content);
        let mut doc = Document::load(&path, &ctx).unwrap();
        process_document(&mut doc, RunPhases::tangle(), &mut std::io::sink()).unwrap();

        let out = fs::read_to_string(dir.path().join("hello.c")).unwrap();
        let file = path.display().to_string();
        assert_eq!(
            out,
            format!(
                "#line 5 \"{f}\"\nint main() {{\n#line 13 \"{f}\"\n    puts(\"hello\");\n#line 7 \"{f}\"\n}}\n",
                f = file
            )
        );
    }

    #[test]
    fn test_weave_and_graph() {
        let content = HELLO.replace(":literate-programming-linedir:", ":literate-programming-graph:");
        let (dir, ctx, path) = setup(&content);
        let mut doc = Document::load(&path, &ctx).unwrap();

        let report = process_document(&mut doc, RunPhases::weave(), &mut std::io::sink()).unwrap();

        assert!(report.written.is_empty());
        assert_eq!(report.titles.len(), 1);
        assert_eq!(
            doc.blocks()[1].title(),
            Some("Print a greeting [.lp-nav.right]#xref:_lp_block_1[\u{2191} hello.c]#")
        );
        assert_eq!(report.graph, Some(dir.path().join("./hello.lp.dot")));
        assert!(dir.path().join("hello.lp.dot").exists());
        assert!(!dir.path().join("hello.c").exists());
    }

    #[test]
    fn test_failing_root_writes_nothing() {
        let content = "\
[source,c,output=bad.c]
----
<<Missing chunk>>
----
";
        let (dir, ctx, path) = setup(content);
        let mut doc = Document::load(&path, &ctx).unwrap();

        let result = process_document(&mut doc, RunPhases::all(), &mut std::io::sink());
        assert!(result.is_err());
        assert!(!dir.path().join("bad.c").exists());
    }

    #[test]
    fn test_file_map_renames_output() {
        let content = "\
:literate-programming-file-map: main.c>a.out.c

[source,c,output=main.c]
----
int main;
----

[source,c,output=util.c]
----
int util;
----
";
        let (dir, mut ctx, path) = setup(content);
        ctx.config.line_templates = crate::config::LineTemplates::disabled();
        let mut doc = Document::load(&path, &ctx).unwrap();

        process_document(&mut doc, RunPhases::tangle(), &mut std::io::sink()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("a.out.c")).unwrap(),
            "int main;\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("util.c")).unwrap(),
            "int util;\n"
        );
        assert!(!dir.path().join("main.c").exists());
    }

    #[test]
    fn test_duplicate_root_writes_nothing() {
        let content = "\
[source,c,output=x]
----
first
----

[source,c,output=x]
----
second
----
";
        let (dir, ctx, path) = setup(content);
        let mut doc = Document::load(&path, &ctx).unwrap();

        let result = process_document(&mut doc, RunPhases::all(), &mut std::io::sink());
        assert!(matches!(
            result,
            Err(crate::errors::LitweaveError::DuplicateRoot(ref n)) if n.as_str() == "x"
        ));
        assert!(!dir.path().join("x").exists());
    }

    #[test]
    fn test_report_json() {
        let (_dir, ctx, path) = setup(HELLO);
        let mut doc = Document::load(&path, &ctx).unwrap();
        let report = process_document(&mut doc, RunPhases::weave(), &mut std::io::sink()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["titles"][0]["id"], "_lp_block_2");
        assert!(json.get("graph").is_none());
    }
}
