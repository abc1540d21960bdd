//! Colored console output: startup tables and the help menu.

use crate::server::EndpointRule;

// ANSI color codes
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW_BG: &str = "\x1b[43m\x1b[30m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

const MAX_CELL_WIDTH: usize = 40;

/// Plain-text table with box-drawing borders.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(|c| truncate(&c.into())).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}\n", segments.join(mid))
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!(" {c:<w$} "))
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = border("┌", "┬", "┐");
        out.push_str(&line(&self.headers));
        out.push_str(&border("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&border("└", "┴", "┘"));
        out
    }
}

fn truncate(cell: &str) -> String {
    let single_line = cell.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_CELL_WIDTH {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

/// Summary of the rules served on one port.
pub fn rules_table(rules: &[EndpointRule]) -> Table {
    let mut table = Table::new([
        "Server Name",
        "Port",
        "Path",
        "Method",
        "Input",
        "Output",
        "Description",
        "File Path",
        "Server URL",
        "Status",
    ]);
    for rule in rules {
        let input = rule
            .expected_input
            .as_ref()
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let output = match &rule.response.file_path {
            Some(_) => "(file)".to_string(),
            None => String::from_utf8_lossy(&rule.response.body).into_owned(),
        };
        let file_path = rule
            .response
            .file_path
            .as_ref()
            .map_or_else(|| "no".to_string(), |p| p.display().to_string());
        table.add_row([
            rule.name.clone(),
            rule.port.to_string(),
            rule.path.clone(),
            rule.methods.to_string(),
            input,
            output,
            rule.description.clone().unwrap_or_default(),
            file_path,
            format!("http://localhost:{}{}", rule.port, rule.path),
            "Running".to_string(),
        ]);
    }
    table
}

/// Reference of the fields accepted in a configuration record.
pub fn field_reference_table() -> Table {
    let mut table = Table::new(["Field", "Meaning"]);
    for (field, meaning) in [
        ("name", "Name of server"),
        ("method", "HTTP Method (GET, POST, etc.) or a list of methods"),
        ("port", "Port to listen on"),
        ("path", "Endpoint path"),
        ("input", "Expected input for matching (request or filePath)"),
        ("output", "Output on match (response, headers, filePath)"),
        ("filePath", "File path for the response or expected input"),
        ("description", "Server description"),
    ] {
        table.add_row([field, meaning]);
    }
    table
}

/// Help menu shown for `--help` and when no config is given.
pub fn help_text() -> String {
    format!(
        "{YELLOW_BG}Help Menu{RESET}\n\
         {GREEN}-c, --config <PATH> : Path to config file{RESET}\n\
         {GREEN}    --host <ADDR>   : Address every listener binds to (default 0.0.0.0){RESET}\n\
         {GREEN}    --log-level     : Log filter used when RUST_LOG is unset (default info){RESET}\n\
         {GREEN}-h, --help          : Show help{RESET}\n{}",
        field_reference_table().render()
    )
}
