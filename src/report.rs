use crate::model::{SkillBook, Total};
use comfy_table::{Attribute, Cell, Color, Table};
use std::collections::BTreeMap;

/// Aggregated scores for one unit: the unit-wide total plus per-project
/// totals. A project maps to None when it has no evaluation yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTotals {
    pub total: Total,
    pub projects: BTreeMap<String, Option<Total>>,
}

pub type TotalMap = BTreeMap<String, UnitTotals>;
pub type SkillTotals = BTreeMap<String, Total>;

/// Per-project and per-unit sums over the whole book.
pub fn calc_totals(book: &SkillBook) -> TotalMap {
    let mut totals = TotalMap::new();

    for (unit_name, projects) in book {
        let mut unit_total = Total::zero();
        let mut project_totals = BTreeMap::new();

        for (project_name, skills) in projects {
            if skills.is_empty() {
                project_totals.insert(project_name.clone(), None);
                continue;
            }

            let total = Total::of_skills(skills);
            unit_total += total;
            project_totals.insert(project_name.clone(), Some(total));
        }

        totals.insert(
            unit_name.clone(),
            UnitTotals {
                total: unit_total,
                projects: project_totals,
            },
        );
    }

    totals
}

/// Accumulates every occurrence of a skill name across all units and
/// projects into one total per skill category.
pub fn calc_skill_totals(book: &SkillBook) -> SkillTotals {
    let mut totals = SkillTotals::new();

    for projects in book.values() {
        for skills in projects.values() {
            for skill in skills {
                *totals.entry(skill.name.clone()).or_default() +=
                    Total::new(skill.value, skill.max_value);
            }
        }
    }

    totals
}

pub fn grand_total(totals: &TotalMap) -> Total {
    totals
        .values()
        .fold(Total::zero(), |acc, unit| acc + unit.total)
}

fn ratio_color(ratio: f64) -> Color {
    if ratio >= 0.75 {
        Color::Green
    } else if ratio >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn total_cell(total: &Total) -> Cell {
    Cell::new(total.to_string()).fg(ratio_color(total.ratio()))
}

/// Units/projects table: one bold summary row per unit, one row per
/// project, and a grand total row at the bottom.
pub fn units_table(totals: &TotalMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Unit", "Project", "Score"]);

    for (unit_name, unit) in totals {
        table.add_row(vec![
            Cell::new(unit_name).add_attribute(Attribute::Bold),
            Cell::new(""),
            total_cell(&unit.total).add_attribute(Attribute::Bold),
        ]);

        for (project_name, total) in &unit.projects {
            let score = match total {
                Some(total) => total_cell(total),
                None => Cell::new("no evaluation").fg(Color::DarkGrey),
            };
            table.add_row(vec![Cell::new(""), Cell::new(project_name), score]);
        }
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        total_cell(&grand_total(totals)).add_attribute(Attribute::Bold),
    ]);

    table
}

pub fn skills_table(skill_totals: &SkillTotals) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Skill", "Score"]);

    for (name, total) in skill_totals {
        table.add_row(vec![Cell::new(name), total_cell(total)]);
    }

    table
}

/// Renders the whole report to stdout.
pub fn print_report(book: &SkillBook) {
    let totals = calc_totals(book);
    let skill_totals = calc_skill_totals(book);

    println!("{}", units_table(&totals));
    println!();
    println!("{}", skills_table(&skill_totals));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;

    fn skill(name: &str, value: f64, max_value: u32) -> Skill {
        Skill {
            name: name.to_string(),
            value,
            max_value,
        }
    }

    fn sample_book() -> SkillBook {
        let mut book = SkillBook::new();

        let mut kernel = BTreeMap::new();
        kernel.insert(
            "ft_ls".to_string(),
            vec![skill("Rigor", 3.0, 5), skill("Autonomy", 4.0, 5)],
        );
        kernel.insert("minishell".to_string(), Vec::new());
        book.insert("Kernel".to_string(), kernel);

        let mut piscine = BTreeMap::new();
        piscine.insert("libft".to_string(), vec![skill("Rigor", 2.0, 5)]);
        book.insert("Piscine".to_string(), piscine);

        book
    }

    #[test]
    fn totals_sum_per_project_and_unit() {
        let totals = calc_totals(&sample_book());

        let kernel = &totals["Kernel"];
        assert_eq!(kernel.total, Total::new(7.0, 10));
        assert_eq!(kernel.projects["ft_ls"], Some(Total::new(7.0, 10)));
        assert_eq!(kernel.projects["minishell"], None);

        let piscine = &totals["Piscine"];
        assert_eq!(piscine.total, Total::new(2.0, 5));
    }

    #[test]
    fn unevaluated_projects_do_not_skew_unit_totals() {
        let mut book = SkillBook::new();
        let mut unit = BTreeMap::new();
        unit.insert("p1".to_string(), Vec::new());
        unit.insert("p2".to_string(), Vec::new());
        book.insert("Empty".to_string(), unit);

        let totals = calc_totals(&book);
        assert_eq!(totals["Empty"].total, Total::zero());
        assert_eq!(totals["Empty"].total.ratio(), 0.0);
    }

    #[test]
    fn skill_totals_group_across_units() {
        let skill_totals = calc_skill_totals(&sample_book());

        assert_eq!(skill_totals["Rigor"], Total::new(5.0, 10));
        assert_eq!(skill_totals["Autonomy"], Total::new(4.0, 5));
        assert_eq!(skill_totals.len(), 2);
    }

    #[test]
    fn grand_total_spans_units() {
        let totals = calc_totals(&sample_book());
        assert_eq!(grand_total(&totals), Total::new(9.0, 15));
    }

    #[test]
    fn ratio_color_thresholds() {
        assert!(matches!(ratio_color(1.0), Color::Green));
        assert!(matches!(ratio_color(0.75), Color::Green));
        assert!(matches!(ratio_color(0.6), Color::Yellow));
        assert!(matches!(ratio_color(0.5), Color::Yellow));
        assert!(matches!(ratio_color(0.49), Color::Red));
        assert!(matches!(ratio_color(0.0), Color::Red));
    }

    #[test]
    fn units_table_flags_missing_evaluations() {
        let totals = calc_totals(&sample_book());
        let rendered = units_table(&totals).to_string();

        assert!(rendered.contains("Kernel"));
        assert!(rendered.contains("minishell"));
        assert!(rendered.contains("no evaluation"));
        assert!(rendered.contains("7 / 10 (70.00%)"));
        assert!(rendered.contains("9 / 15 (60.00%)"));
    }

    #[test]
    fn skills_table_lists_categories() {
        let skill_totals = calc_skill_totals(&sample_book());
        let rendered = skills_table(&skill_totals).to_string();

        assert!(rendered.contains("Rigor"));
        assert!(rendered.contains("5 / 10 (50.00%)"));
    }
}
