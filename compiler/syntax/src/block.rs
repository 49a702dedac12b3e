//! Convert indented source text into a tree of unparsed blocks.

use crate::{Error, Result, COMMENT_PREFIX, INDENT_WIDTH};
use serde::{Deserialize, Serialize};

/// The text of the block created when the input has more than one top-level
/// line. Its children are evaluated in order, yielding the last.
pub const SEQUENCE_TEXT: &str = "last";

/// One source line along with the lines indented beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// The 1-based line number, or 0 for a synthetic sequence block.
    pub line: usize,

    /// The line's text, without indentation.
    pub text: String,

    /// The blocks indented one level beneath this one, in source order.
    pub children: Vec<Block>,
}

impl Block {
    /// Create a block without children.
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Block {
            line,
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create a synthetic block that evaluates `children` in order.
    pub fn sequence(children: Vec<Block>) -> Self {
        Block {
            line: 0,
            text: String::from(SEQUENCE_TEXT),
            children,
        }
    }
}

/// Build the block tree for `source`.
///
/// Blank lines and comment lines are skipped. Each remaining line becomes a
/// child of the nearest preceding line that is indented less than it. If
/// there is exactly one top-level line, its block is returned; otherwise the
/// top-level blocks are wrapped in a [`Block::sequence`].
pub fn build(source: &str, max_depth: usize) -> Result<Block> {
    let mut top_level = Vec::new();

    // Blocks that may still receive children, paired with their depth. Depths
    // strictly increase from the bottom of the stack to the top.
    let mut open: Vec<(usize, Block)> = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;

        let text = line.trim();
        if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let depth = depth(line, number)?;
        if depth > max_depth {
            return Err(Error::NestingTooDeep { limit: max_depth });
        }

        while open.last().is_some_and(|&(open_depth, _)| open_depth >= depth) {
            close(&mut open, &mut top_level);
        }

        if depth > 0 && open.is_empty() {
            return Err(Error::MalformedIndentation {
                line: number,
                width: depth * INDENT_WIDTH,
            });
        }

        open.push((depth, Block::new(number, text)));
    }

    while !open.is_empty() {
        close(&mut open, &mut top_level);
    }

    tracing::debug!(top_level = top_level.len(), "built block tree");

    match top_level.len() {
        0 => Err(Error::EmptyInput),
        1 => Ok(top_level.remove(0)),
        _ => Ok(Block::sequence(top_level)),
    }
}

fn depth(line: &str, number: usize) -> Result<usize> {
    let indentation = &line[..line.len() - line.trim_start().len()];
    let width = indentation.chars().count();

    if width % INDENT_WIDTH != 0 || indentation.chars().any(|c| c != ' ') {
        return Err(Error::MalformedIndentation {
            line: number,
            width,
        });
    }

    Ok(width / INDENT_WIDTH)
}

fn close(open: &mut Vec<(usize, Block)>, top_level: &mut Vec<Block>) {
    if let Some((_, block)) = open.pop() {
        match open.last_mut() {
            Some((_, parent)) => parent.children.push(block),
            None => top_level.push(block),
        }
    }
}
