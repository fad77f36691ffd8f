use std::fmt;

/// Working directory of the interpreter, tracked relative to the session
/// root (the folder holding `biases/`, `lights/`, ...).
///
/// Paths are normalized lexically; the file system is never consulted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkDir {
    absolute: bool,
    parts: Vec<String>,
}

impl WorkDir {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        !self.absolute && self.parts.is_empty()
    }

    /// Apply a `cd <path>`.
    pub fn change(&mut self, path: &str) {
        let path = path.trim();
        if path.starts_with('/') {
            self.absolute = true;
            self.parts.clear();
        }
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => self.parent(),
                name => self.parts.push(name.to_string()),
            }
        }
    }

    /// The directory `path` leads to from here.
    pub fn join(&self, path: &str) -> Self {
        let mut next = self.clone();
        next.change(path);
        next
    }

    fn parent(&mut self) {
        let above_root = !self.absolute && self.parts.last().is_none_or(|p| p == "..");
        if above_root {
            self.parts.push("..".into());
        } else {
            self.parts.pop();
        }
    }
}

impl fmt::Display for WorkDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "/{}", self.parts.join("/"))
        } else if self.parts.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.parts.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_folder() {
        let mut dir = WorkDir::root();
        dir.change("lights");
        dir.change("../process");
        assert_eq!(dir.to_string(), "process");
        dir.change("..");
        assert!(dir.is_root());
    }

    #[test]
    fn test_above_root() {
        let dir = WorkDir::root().join("..").join("../x");
        assert_eq!(dir.to_string(), "../../x");
    }

    #[test]
    fn test_absolute() {
        let dir = WorkDir::root().join("lights").join("/data/out/./");
        assert_eq!(dir.to_string(), "/data/out");
        let top = dir.join("../../..");
        assert_eq!(top.to_string(), "/");
    }

    #[test]
    fn test_nested_output() {
        let dir = WorkDir::root().join("lights").join("../work/process");
        assert_eq!(dir.to_string(), "work/process");
        assert_eq!(dir.join("..").to_string(), "work");
    }
}
