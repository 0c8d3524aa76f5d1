use crate::model::Period;
use crate::timetable::{Cell, WeekGrid};

/// Permet de customiser le rendu d'une grille (texte, HTML, etc.).
pub trait GridRenderer {
    fn render(&self, title: &str, grid: &WeekGrid, periods: &[Period]) -> String;
}

/// Tableau texte à colonnes alignées ; les cases libres sont affichées `-`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextGrid;

impl GridRenderer for TextGrid {
    fn render(&self, title: &str, grid: &WeekGrid, periods: &[Period]) -> String {
        let names = grid.periods();
        let times: Vec<&str> = names
            .iter()
            .map(|n| {
                periods
                    .iter()
                    .find(|p| &p.name == n)
                    .map(|p| p.time.as_str())
                    .unwrap_or("")
            })
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        rows.push(
            std::iter::once("Day".to_string())
                .chain(names.iter().cloned())
                .collect(),
        );
        rows.push(
            std::iter::once(String::new())
                .chain(times.iter().map(|t| t.to_string()))
                .collect(),
        );
        for day in grid.days() {
            let cells = grid.row(day).unwrap_or(&[]);
            rows.push(
                std::iter::once(day.to_string())
                    .chain(cells.iter().map(cell_text))
                    .collect(),
            );
        }

        let columns = rows.first().map_or(0, Vec::len);
        let widths: Vec<usize> = (0..columns)
            .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = format!("{title}\n");
        for row in &rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(text, &w)| format!("{text:<w$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Free => "-".to_string(),
        booked => booked.to_string(),
    }
}
