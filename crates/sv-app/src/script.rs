// ABOUTME: Command script parsing and execution for the replay harness.
// ABOUTME: One command per line; `#` starts a comment.

use std::fmt;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use sv_layout::{LayoutEngine, Orientation, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Root(String),
    Area { width: f32, height: f32 },
    Split {
        target: String,
        content: String,
        orientation: Orientation,
    },
    Remove(String),
    Resize { content: String, size: f32 },
    Populate(String),
    Show,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Root(name) => write!(f, "root {}", name),
            Command::Area { width, height } => write!(f, "area {} {}", width, height),
            Command::Split {
                target,
                content,
                orientation,
            } => write!(f, "split {} {} {:?}", target, content, orientation),
            Command::Remove(name) => write!(f, "remove {}", name),
            Command::Resize { content, size } => write!(f, "resize {} {}", content, size),
            Command::Populate(name) => write!(f, "populate {}", name),
            Command::Show => write!(f, "show"),
        }
    }
}

fn parse_orientation(word: &str) -> Result<Orientation> {
    match word {
        "vertical" | "v" => Ok(Orientation::Vertical),
        "horizontal" | "h" => Ok(Orientation::Horizontal),
        other => bail!("unknown orientation '{}'", other),
    }
}

fn parse_number(word: &str) -> Result<f32> {
    word.parse()
        .with_context(|| format!("'{}' is not a number", word))
}

fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["root", name] => Command::Root(name.to_string()),
        ["area", width, height] => Command::Area {
            width: parse_number(width)?,
            height: parse_number(height)?,
        },
        ["split", target, content, orientation] => Command::Split {
            target: target.to_string(),
            content: content.to_string(),
            orientation: parse_orientation(orientation)?,
        },
        ["remove", name] => Command::Remove(name.to_string()),
        ["resize", content, size] => Command::Resize {
            content: content.to_string(),
            size: parse_number(size)?,
        },
        ["populate", name] => Command::Populate(name.to_string()),
        ["show"] => Command::Show,
        _ => bail!("unrecognized command '{}'", line),
    };
    Ok(Some(command))
}

/// Parse a whole script into commands tagged with their 1-based line numbers
pub fn parse(source: &str) -> Result<Vec<(usize, Command)>> {
    let mut commands = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        if let Some(command) =
            parse_line(line).with_context(|| format!("line {}", number))?
        {
            commands.push((number, command));
        }
    }
    Ok(commands)
}

fn format_rect(rect: &Rect) -> String {
    format!(
        "{:.1},{:.1} {:.1}x{:.1}",
        rect.x, rect.y, rect.width, rect.height
    )
}

/// A layout being driven by a script
pub struct Replay {
    engine: LayoutEngine<String>,
}

impl Replay {
    pub fn new(engine: LayoutEngine<String>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &LayoutEngine<String> {
        &self.engine
    }

    fn leaf(&self, content: &str) -> Result<sv_layout::NodeId> {
        self.engine
            .leaf_of(&content.to_string())
            .ok_or_else(|| anyhow!("no pane holds '{}'", content))
    }

    pub fn apply(&mut self, command: &Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Root(_) => bail!("root must come before any other command"),
            Command::Area { width, height } => {
                self.engine.set_area(Rect::sized(*width, *height))?;
            }
            Command::Split {
                target,
                content,
                orientation,
            } => {
                let target = self.leaf(target)?;
                self.engine.split(target, content.clone(), *orientation)?;
            }
            Command::Remove(content) => {
                let target = self.leaf(content)?;
                let removal = self.engine.remove(target)?;
                match removal.neighbor {
                    Some(neighbor) => writeln!(out, "removed {}, focus {}", removal.content, neighbor)?,
                    None => {
                        let successor = removal
                            .successor
                            .and_then(|id| self.engine.content_of(id));
                        match successor {
                            Some(successor) => {
                                writeln!(out, "removed {}, focus {}", removal.content, successor)?
                            }
                            None => writeln!(out, "removed {}, layout empty", removal.content)?,
                        }
                    }
                }
            }
            Command::Resize { content, size } => {
                let leaf = self.leaf(content)?;
                let split = self
                    .engine
                    .parent_of(leaf)
                    .ok_or_else(|| anyhow!("'{}' is not inside a split", content))?;
                let divider = self
                    .engine
                    .dividers()
                    .find(|divider| divider.id.node() == split)
                    .ok_or_else(|| anyhow!("no divider above '{}'", content))?;
                let applied = self.engine.set_primary_size(divider.id, *size)?;
                writeln!(out, "divider above {} at {:.1}", content, applied)?;
            }
            Command::Populate(content) => {
                self.engine.populate(content.clone())?;
            }
            Command::Show => self.show(out)?,
        }
        Ok(())
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "panes:")?;
        for leaf in self.engine.leaves() {
            let path: Vec<&str> = leaf
                .path
                .iter()
                .map(|side| match side {
                    sv_layout::Side::Primary => "p",
                    sv_layout::Side::Secondary => "s",
                })
                .collect();
            writeln!(
                out,
                "  {} [{}] neighbor={} path={}",
                leaf.content,
                format_rect(&leaf.bounds),
                leaf.neighbor.map(String::as_str).unwrap_or("-"),
                if path.is_empty() { "root".to_string() } else { path.join("") }
            )?;
        }
        writeln!(out, "dividers:")?;
        for divider in self.engine.dividers() {
            writeln!(
                out,
                "  {:?} at {:.1} [{}]",
                divider.orientation,
                divider.primary_size,
                format_rect(&divider.bounds)
            )?;
        }
        Ok(())
    }
}
