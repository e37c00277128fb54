//! Tangle algorithm for expanding chunk references.

use std::io::Write;

use crate::config::{match_reference, render_directive, LineTemplates};
use crate::errors::{LitweaveError, Result};

use super::chunk_db::ChunkDb;
use super::chunk_name::{resolve, ChunkName};
use super::element::Element;

/// State inherited by a chunk from the line that included it.
#[derive(Debug, Clone)]
struct Frame<'t> {
    indent: String,
    /// Directive template active at the call site.
    template: &'t str,
}

/// Expands chunks of one database into output text.
#[derive(Debug, Clone, Copy)]
pub struct Tangler<'a> {
    db: &'a ChunkDb,
    templates: &'a LineTemplates,
}

impl<'a> Tangler<'a> {
    /// Creates a tangler over `db`.
    pub fn new(db: &'a ChunkDb, templates: &'a LineTemplates) -> Self {
        Self { db, templates }
    }

    /// Expands the root chunk `name` into `sink`.
    pub fn tangle_root<W: Write + ?Sized>(&self, name: &ChunkName, sink: &mut W) -> Result<()> {
        let elements = self
            .db
            .root(name)
            .ok_or_else(|| LitweaveError::UndefinedChunk(name.clone()))?;
        self.expand(sink, name, elements, &self.top_frame(""), &mut Vec::new())
    }

    /// Expands the ordinary chunk `name` with every line prefixed by `indent`.
    pub fn tangle_chunk<W: Write + ?Sized>(
        &self,
        name: &ChunkName,
        indent: &str,
        sink: &mut W,
    ) -> Result<()> {
        let elements = self
            .db
            .chunk(name)
            .ok_or_else(|| LitweaveError::UndefinedChunk(name.clone()))?;
        self.expand(sink, name, elements, &self.top_frame(indent), &mut Vec::new())
    }

    /// Expands a root chunk into a string.
    pub fn tangle_to_string(&self, name: &ChunkName) -> Result<String> {
        let mut buffer = Vec::new();
        self.tangle_root(name, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| LitweaveError::Other(e.to_string()))
    }

    fn top_frame(&self, indent: &str) -> Frame<'a> {
        Frame {
            indent: indent.to_string(),
            template: self.templates.default_template(),
        }
    }

    /// `path` holds the chunks being expanded, outermost first.
    fn expand<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        name: &ChunkName,
        elements: &[Element],
        frame: &Frame<'a>,
        path: &mut Vec<ChunkName>,
    ) -> Result<()> {
        if path.contains(name) {
            let mut cycle = path.clone();
            cycle.push(name.clone());
            return Err(LitweaveError::CycleDetected(cycle));
        }
        path.push(name.clone());

        let mut template = frame.template;
        let mut file: Option<String> = None;
        let mut line = 0;

        for element in elements {
            match element {
                Element::Language(tag) => template = self.templates.for_language(tag),
                Element::Position(location) => {
                    let label = location.file_label();
                    line = location.line;
                    write_directive(sink, template, &label, line)?;
                    file = Some(label);
                }
                Element::Text(text) => {
                    line += 1;
                    if let Some((indent, title)) = match_reference(text) {
                        let target = resolve(title, self.db.known_names())?;
                        let callee = self
                            .db
                            .chunk(&target)
                            .ok_or_else(|| LitweaveError::UndefinedChunk(target.clone()))?;
                        let inner = Frame {
                            indent: format!("{}{}", frame.indent, indent),
                            template,
                        };
                        self.expand(sink, &target, callee, &inner, path)?;

                        // Back in this chunk's coordinates.
                        if let Some(ref label) = file {
                            write_directive(sink, template, label, line)?;
                        }
                    } else if text.is_empty() {
                        writeln!(sink)?;
                    } else {
                        writeln!(sink, "{}{}", frame.indent, text)?;
                    }
                }
            }
        }

        path.pop();
        Ok(())
    }
}

fn write_directive<W: Write + ?Sized>(
    sink: &mut W,
    template: &str,
    file: &str,
    line: usize,
) -> Result<()> {
    if let Some(directive) = render_directive(template, file, line) {
        writeln!(sink, "{}", directive)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::test_utils::{root_block, source_block};
    use crate::text_location::TextLocation;
    use pretty_assertions::assert_eq;

    fn build(mut blocks: Vec<Block>) -> ChunkDb {
        ChunkDb::build(&mut blocks).unwrap()
    }

    fn naked(db: &ChunkDb, root: &str) -> Result<String> {
        let templates = LineTemplates::disabled();
        Tangler::new(db, &templates).tangle_to_string(&ChunkName::new(root))
    }

    fn at(mut block: Block, line: usize) -> Block {
        block.location = TextLocation::file_line("doc.adoc", line);
        block
    }

    #[test]
    fn test_order_preserved() {
        let db = build(vec![
            root_block("r1", "out", &["x", "<<B>>", "y"]),
            source_block("b1", "B", &["1", "2"]),
        ]);
        assert_eq!(naked(&db, "out").unwrap(), "x\n1\n2\ny\n");
    }

    #[test]
    fn test_nested_indentation() {
        let db = build(vec![
            root_block("r1", "main.py", &["if True:", "    <<inner part>>"]),
            source_block("b1", "inner part", &["if True:", "    <<deepest part>>"]),
            source_block("b2", "deepest part", &["print('deep')", "", "pass"]),
        ]);
        assert_eq!(
            naked(&db, "main.py").unwrap(),
            "if True:\n    if True:\n        print('deep')\n\n        pass\n"
        );
    }

    #[test]
    fn test_indent_propagation_from_caller() {
        let db = build(vec![
            source_block("a1", "A", &["a", "  <<B>>"]),
            source_block("b1", "B", &["b"]),
        ]);
        let templates = LineTemplates::disabled();
        let mut out = Vec::new();
        Tangler::new(&db, &templates)
            .tangle_chunk(&ChunkName::new("A"), ">> ", &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">> a\n>>   b\n");
    }

    #[test]
    fn test_multi_block_chunk() {
        let db = build(vec![
            root_block("r1", "out", &["<<B>>"]),
            source_block("b1", "B", &["a"]),
            source_block("b2", "B", &["b"]),
        ]);
        assert_eq!(naked(&db, "out").unwrap(), "a\nb\n");
    }

    #[test]
    fn test_cycle_detection() {
        let db = build(vec![
            root_block("r1", "out", &["<<A>>"]),
            source_block("a1", "A", &["<<B>>"]),
            source_block("b1", "B", &["<<A>>"]),
        ]);
        match naked(&db, "out") {
            Err(LitweaveError::CycleDetected(path)) => {
                let names: Vec<_> = path.iter().map(ChunkName::as_str).collect();
                assert_eq!(names, vec!["out", "A", "B", "A"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference() {
        let db = build(vec![
            root_block("r1", "out", &["<<Again>>"]),
            source_block("a1", "Again", &["x", "  <<Again>>"]),
        ]);
        match naked(&db, "out") {
            Err(LitweaveError::CycleDetected(path)) => assert_eq!(
                path,
                vec![ChunkName::new("out"), ChunkName::new("Again"), ChunkName::new("Again")]
            ),
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_sibling_reuse_is_not_a_cycle() {
        let db = build(vec![
            root_block("r1", "one", &["<<Shared>>", "<<Shared>>"]),
            root_block("r2", "two", &["<<Shared>>"]),
            source_block("s1", "Shared", &["s"]),
        ]);
        assert_eq!(naked(&db, "one").unwrap(), "s\ns\n");
        assert_eq!(naked(&db, "two").unwrap(), "s\n");
    }

    #[test]
    fn test_undefined_reference() {
        let db = build(vec![root_block("r1", "out", &["<<Missing>>"])]);
        assert!(matches!(
            naked(&db, "out"),
            Err(LitweaveError::UndefinedChunk(ref n)) if n.as_str() == "Missing"
        ));
    }

    #[test]
    fn test_roots_are_not_referenceable() {
        let db = build(vec![
            root_block("r1", "a.c", &["<<b.c>>"]),
            root_block("r2", "b.c", &["b"]),
        ]);
        assert!(matches!(
            naked(&db, "a.c"),
            Err(LitweaveError::UndefinedChunk(_))
        ));
    }

    #[test]
    fn test_position_directives() {
        let db = build(vec![
            at(
                root_block("r1", "main.c", &["int main() {", "    <<Body>>", "}"])
                    .with_attribute("language", "c"),
                10,
            ),
            at(source_block("b1", "Body", &["return 0;"]), 20),
        ]);
        let templates = LineTemplates::default();
        let out = Tangler::new(&db, &templates)
            .tangle_to_string(&ChunkName::new("main.c"))
            .unwrap();
        assert_eq!(
            out,
            "#line 10 \"doc.adoc\"\n\
             int main() {\n\
             #line 20 \"doc.adoc\"\n    return 0;\n\
             #line 12 \"doc.adoc\"\n\
             }\n"
        );
    }

    #[test]
    fn test_caller_language_restored() {
        let mut templates = LineTemplates::disabled();
        templates.set("c", "// c {line}");
        templates.set("lua", "-- lua {line}");

        let db = build(vec![
            at(
                root_block("r1", "out", &["<<Script>>", "c_code();"])
                    .with_attribute("language", "c"),
                1,
            ),
            at(
                source_block("s1", "Script", &["<<Common>>", "lua_code()"])
                    .with_attribute("language", "lua"),
                10,
            ),
            at(source_block("c1", "Common", &["common"]), 20),
        ]);

        let out = Tangler::new(&db, &templates)
            .tangle_to_string(&ChunkName::new("out"))
            .unwrap();
        assert_eq!(
            out,
            "// c 1\n\
             -- lua 10\n\
             -- lua 20\n\
             common\n\
             -- lua 11\n\
             lua_code()\n\
             // c 2\n\
             c_code();\n"
        );
    }

    #[test]
    fn test_empty_template_suppresses_directives() {
        let mut templates = LineTemplates::default();
        templates.set("python", "");

        let db = build(vec![at(
            root_block("r1", "main.py", &["print(1)"]).with_attribute("language", "python"),
            5,
        )]);
        let out = Tangler::new(&db, &templates)
            .tangle_to_string(&ChunkName::new("main.py"))
            .unwrap();
        assert_eq!(out, "print(1)\n");
    }
}
