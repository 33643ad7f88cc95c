use std::fmt::Debug;

use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{Cell, get_cell, get_cell_text};

/// Maps free-form column titles to a fixed set of fields using per-field alias lists.
///
/// A title matches an alias if they are equal after normalization, or, when substring matching
/// is enabled, if the title contains the alias. Both checks are also tried with dots removed
/// from the title, so "N.I.F." matches "NIF".
pub struct ColumnAliases<F: 'static> {
    columns: &'static [(F, &'static [&'static str])],
    substring_matching: bool,
}

impl<F: Copy + PartialEq + Debug> ColumnAliases<F> {
    pub const fn new(columns: &'static [(F, &'static [&'static str])], substring_matching: bool) -> ColumnAliases<F> {
        ColumnAliases {columns, substring_matching}
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.columns.iter().map(|(field, _)| *field)
    }

    /// Resolves a single title, preferring exact matches over substring ones.
    pub fn resolve(&self, title: &str) -> Option<F> {
        let title = normalize_title(title);
        if title.is_empty() {
            return None;
        }

        self.columns.iter()
            .find(|(_, aliases)| matches_exactly(&title, aliases))
            .or_else(|| {
                if !self.substring_matching {
                    return None;
                }
                self.columns.iter().find(|(_, aliases)| contains_alias(&title, aliases))
            })
            .map(|(field, _)| *field)
    }

    pub fn map_columns(&self, header: &[Cell]) -> ColumnsMapping<F> {
        let titles: Vec<String> = header.iter()
            .map(|cell| normalize_title(&get_cell_text(cell)))
            .collect();

        let mut mapping: Vec<(F, usize)> = Vec::new();

        let claim = |field: F, matches: &dyn Fn(&str) -> bool, mapping: &mut Vec<(F, usize)>| {
            if mapping.iter().any(|&(mapped, _)| mapped == field) {
                return;
            }

            let column_id = titles.iter().enumerate().position(|(column_id, title)| {
                !title.is_empty() && !mapping.iter().any(|&(_, mapped)| mapped == column_id) && matches(title.as_str())
            });

            if let Some(column_id) = column_id {
                mapping.push((field, column_id));
            }
        };

        for &(field, aliases) in self.columns {
            claim(field, &|title: &str| matches_exactly(title, aliases), &mut mapping);
        }

        if self.substring_matching {
            for &(field, aliases) in self.columns {
                claim(field, &|title: &str| contains_alias(title, aliases), &mut mapping);
            }
        }

        let mapping = ColumnsMapping {mapping};
        debug!("Columns mapping: {}.", mapping.describe(&titles));

        mapping
    }
}

pub struct ColumnsMapping<F> {
    mapping: Vec<(F, usize)>,
}

impl<F: Copy + PartialEq + Debug> ColumnsMapping<F> {
    pub fn column_id(&self, field: F) -> Option<usize> {
        self.mapping.iter()
            .find(|&&(mapped, _)| mapped == field)
            .map(|&(_, column_id)| column_id)
    }

    pub fn contains(&self, field: F) -> bool {
        self.column_id(field).is_some()
    }

    pub fn get<'a>(&self, row: &'a [Cell], field: F) -> Option<&'a Cell> {
        self.column_id(field).map(|column_id| get_cell(row, column_id))
    }

    fn describe(&self, titles: &[String]) -> String {
        if self.mapping.is_empty() {
            return "none".to_owned();
        }

        self.mapping.iter()
            .map(|&(field, column_id)| format!("{:?} <- {:?}", field, titles[column_id]))
            .join(", ")
    }
}

/// Normalizes a column title for matching: trims it, upper-cases it, folds Spanish accents and
/// collapses underscores and repeated whitespace into single spaces.
pub fn normalize_title(title: &str) -> String {
    lazy_static! {
        static ref SPACES_REGEX: Regex = Regex::new(r"[\s_]+").unwrap();
    }

    let folded: String = title.chars()
        .flat_map(char::to_uppercase)
        .map(|c| match c {
            'Á' | 'À' => 'A',
            'É' | 'È' => 'E',
            'Í' | 'Ì' => 'I',
            'Ó' | 'Ò' => 'O',
            'Ú' | 'Ù' | 'Ü' => 'U',
            _ => c,
        })
        .collect();

    SPACES_REGEX.replace_all(folded.trim(), " ").trim().to_owned()
}

fn without_dots(title: &str) -> String {
    title.replace('.', "").trim().to_owned()
}

fn matches_exactly(title: &str, aliases: &[&str]) -> bool {
    let dotless = without_dots(title);
    aliases.iter().any(|alias| {
        let alias = normalize_title(alias);
        title == alias || dotless == alias
    })
}

fn contains_alias(title: &str, aliases: &[&str]) -> bool {
    let dotless = without_dots(title);
    aliases.iter().any(|alias| {
        let alias = normalize_title(alias);
        title.contains(&alias) || dotless.contains(&alias)
    })
}
