use pad::PadStr;

/// Plain text grid, column widths follow the widest cell. Widths are measured
/// with `console` so styled cells line up.
pub struct Table {
    titles: Vec<String>,
    rows: Vec<Vec<String>>,
    headless: bool,
}

impl Table {
    pub fn new(titles: &[&str], size: usize, headless: bool) -> Table {
        Table {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            rows: Vec::with_capacity(size),
            headless,
        }
    }

    /// Short rows are padded with empty cells, extra cells are dropped.
    pub fn add(&mut self, mut row: Vec<String>) {
        row.resize(self.titles.len(), String::new());
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let ncol = self.titles.len();
        let mut widths = Vec::with_capacity(ncol);
        for coli in 0..ncol {
            let cells = self.visible_rows().map(|row| &row[coli]);
            let width = cells
                .map(|cell| console::measure_text_width(cell))
                .max()
                .unwrap_or(0);
            widths.push(width);
        }

        let mut split = String::from("+");
        for width in widths.iter() {
            split.push_str(&"-".repeat(width + 2));
            split.push('+');
        }

        let mut out = String::new();
        out.push_str(&split);
        out.push('\n');
        for (rowi, row) in self.visible_rows().enumerate() {
            out.push('|');
            for (cell, width) in row.iter().zip(widths.iter()) {
                let text = cell.pad_to_width_with_alignment(*width, pad::Alignment::Left);
                out.push_str(&format!(" {text} |"));
            }
            out.push('\n');

            if !self.headless && rowi == 0 {
                out.push_str(&split);
                out.push('\n');
            }
        }
        out.push_str(&split);
        out
    }

    pub fn show(self) {
        println!("{}", self.render());
    }

    fn visible_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        let head = if self.headless { None } else { Some(&self.titles) };
        head.into_iter().chain(self.rows.iter())
    }
}
