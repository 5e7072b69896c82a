use crate::error::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn save_json(data: &impl serde::Serialize, path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json_string = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

pub fn load_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Skill, SkillBook};
    use std::collections::BTreeMap;

    #[test]
    fn skill_book_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.json");

        let mut book = SkillBook::new();
        let mut projects = BTreeMap::new();
        projects.insert(
            "ft_ls".to_string(),
            vec![Skill {
                name: "Rigor".to_string(),
                value: 3.5,
                max_value: 5,
            }],
        );
        projects.insert("minishell".to_string(), Vec::new());
        book.insert("Kernel".to_string(), projects);

        save_json(&book, &path).unwrap();
        let loaded: SkillBook = load_json(&path).unwrap();
        assert_eq!(loaded, book);
        assert!(loaded["Kernel"]["minishell"].is_empty());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(load_json::<SkillBook>("/nonexistent/skills.json").is_err());
    }
}
