use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

/// An organizational grouping (course/cohort) on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub url: String,
}

/// A gradable assignment inside a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub url: String,
}

/// One scored competency from the latest evaluation of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub value: f64,
    pub max_value: u32,
}

/// Persisted shape: unit name -> project name -> skills of the latest
/// evaluation. An empty skill list means no evaluation was found.
pub type SkillBook = BTreeMap<String, BTreeMap<String, Vec<Skill>>>;

/// Score accumulator with a derived ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Total {
    pub total: f64,
    pub total_max: u32,
}

impl Total {
    pub fn new(total: f64, total_max: u32) -> Self {
        Self { total, total_max }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn ratio(&self) -> f64 {
        if self.total_max == 0 {
            0.0
        } else {
            self.total / self.total_max as f64
        }
    }

    /// Sums a project's skills into a single total.
    pub fn of_skills(skills: &[Skill]) -> Self {
        skills.iter().fold(Self::zero(), |mut acc, s| {
            acc += Total::new(s.value, s.max_value);
            acc
        })
    }
}

impl AddAssign for Total {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.total_max += other.total_max;
    }
}

impl Add for Total {
    type Output = Total;

    fn add(mut self, other: Self) -> Total {
        self += other;
        self
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({:.2}%)",
            self.total,
            self.total_max,
            self.ratio() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, value: f64, max_value: u32) -> Skill {
        Skill {
            name: name.to_string(),
            value,
            max_value,
        }
    }

    #[test]
    fn ratio_is_zero_when_max_is_zero() {
        assert_eq!(Total::zero().ratio(), 0.0);
        assert_eq!(Total::new(3.0, 0).ratio(), 0.0);
    }

    #[test]
    fn accumulation_sums_both_sides() {
        let mut t = Total::zero();
        t += Total::new(3.0, 5);
        t += Total::new(1.5, 5);
        assert_eq!(t, Total::new(4.5, 10));
        assert_eq!(t.ratio(), 0.45);
    }

    #[test]
    fn add_is_commutative() {
        let a = Total::new(2.0, 4);
        let b = Total::new(1.0, 6);
        assert_eq!(a + b, b + a);
    }

    #[test]
    fn total_of_skills() {
        let skills = vec![skill("a", 4.0, 5), skill("b", 2.5, 5)];
        assert_eq!(Total::of_skills(&skills), Total::new(6.5, 10));
        assert_eq!(Total::of_skills(&[]), Total::zero());
    }

    #[test]
    fn display_includes_percentage() {
        assert_eq!(Total::new(3.0, 4).to_string(), "3 / 4 (75.00%)");
        assert_eq!(Total::zero().to_string(), "0 / 0 (0.00%)");
    }

    #[test]
    fn skill_json_round_trip() {
        let s = skill("Rigor", 3.5, 5);
        let json = serde_json::to_string(&s).unwrap();
        let back: Skill = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
