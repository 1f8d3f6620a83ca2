//! Line-oriented graph scripts.
//!
//! Each non-blank line that does not start with `#` is one step:
//!
//! ```text
//! node A
//! edge A B 1.5
//! path A B
//! neighbors A
//! distances A
//! clear
//! ```

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    Node(String),
    Edge { a: String, b: String, weight: f64 },
    Path { source: String, target: String },
    Neighbors(String),
    Distances(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line {
    /// 1-based line number in the input.
    pub(crate) number: usize,
    pub(crate) step: Step,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SyntaxError {
    pub(crate) line: usize,
    pub(crate) message: String,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

pub(crate) fn parse(text: &str) -> Result<Vec<Line>, SyntaxError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = parse_step(trimmed).map_err(|message| SyntaxError {
            line: number,
            message,
        })?;
        out.push(Line { number, step });
    }
    Ok(out)
}

fn parse_step(line: &str) -> Result<Step, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (keyword, operands) = tokens
        .split_first()
        .ok_or_else(|| "empty step".to_string())?;

    let expect = |n: usize, usage: &str| -> Result<(), String> {
        if operands.len() == n {
            Ok(())
        } else {
            Err(format!("expected `{usage}`"))
        }
    };

    match keyword.to_ascii_lowercase().as_str() {
        "node" => {
            expect(1, "node <id>")?;
            Ok(Step::Node(operands[0].to_string()))
        }
        "edge" => {
            expect(3, "edge <a> <b> <weight>")?;
            let weight = operands[2]
                .parse::<f64>()
                .map_err(|_| format!("invalid weight `{}`", operands[2]))?;
            Ok(Step::Edge {
                a: operands[0].to_string(),
                b: operands[1].to_string(),
                weight,
            })
        }
        "path" => {
            expect(2, "path <source> <target>")?;
            Ok(Step::Path {
                source: operands[0].to_string(),
                target: operands[1].to_string(),
            })
        }
        "neighbors" => {
            expect(1, "neighbors <id>")?;
            Ok(Step::Neighbors(operands[0].to_string()))
        }
        "distances" => {
            expect(1, "distances <source>")?;
            Ok(Step::Distances(operands[0].to_string()))
        }
        "clear" => {
            expect(0, "clear")?;
            Ok(Step::Clear)
        }
        other => Err(format!("unknown step `{other}`")),
    }
}
