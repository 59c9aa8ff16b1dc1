//! Project structure listing
//!
//! One level of grouping only: every file below a top-level directory is
//! listed under that directory by its bare file name.

use std::collections::HashMap;

use crate::domain::FileRecord;

pub fn render_tree(root_name: &str, files: &[FileRecord]) -> String {
    let mut lines = vec![format!("📁 {root_name}/")];
    let mut groups: Vec<(&str, Vec<&FileRecord>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for file in files {
        match file.relative_path().split_once('/') {
            Some((top, _)) => match index.get(top) {
                Some(&i) => groups[i].1.push(file),
                None => {
                    index.insert(top, groups.len());
                    groups.push((top, vec![file]));
                }
            },
            None => lines.push(format!("├── {}", file.file_name())),
        }
    }

    for (dir, members) in groups {
        lines.push(format!("├── 📁 {dir}/"));
        for file in members {
            lines.push(format!("│   ├── {}", file.file_name()));
        }
    }

    lines.join("\n")
}
