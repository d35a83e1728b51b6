//! Program statistics
//!
//! Counts the kinds of lines in an emitted winding program.

/// Line counts of a winding program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramSummary {
    /// All lines
    pub total_lines: usize,
    /// `G01 X.. Z..` linear moves
    pub moves: usize,
    /// `G01 F..` feed rate changes
    pub feed_rates: usize,
    /// `G92` position redefinitions
    pub position_sets: usize,
    /// `G28` homing commands
    pub homes: usize,
    /// `G20`/`G21` unit declarations
    pub unit_selects: usize,
    /// `( .. )` comments
    pub comments: usize,
}

impl ProgramSummary {
    /// Classify every line of `lines`
    pub fn from_lines(lines: &[String]) -> Self {
        let mut summary = Self {
            total_lines: lines.len(),
            ..Default::default()
        };

        for line in lines {
            let trimmed = line.trim();
            if trimmed.starts_with('(') {
                summary.comments += 1;
            } else if let Some(rest) = trimmed.strip_prefix("G01 ") {
                if rest.starts_with('F') {
                    summary.feed_rates += 1;
                } else {
                    summary.moves += 1;
                }
            } else if trimmed.starts_with("G92") {
                summary.position_sets += 1;
            } else if trimmed == "G28" {
                summary.homes += 1;
            } else if trimmed == "G20" || trimmed == "G21" {
                summary.unit_selects += 1;
            }
        }

        summary
    }
}
