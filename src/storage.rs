use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn load_note(path: &Path) -> Result<String, std::io::Error> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        // A note that does not exist yet is an empty ledger, not an error.
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err),
    }
}

pub fn save_note(path: &Path, text: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{load_note, save_note};

    #[test]
    fn loads_a_missing_note_as_an_empty_ledger() {
        let path = temp_file("timenote_missing.note");
        let _ = fs::remove_file(&path);

        let text = load_note(&path).expect("load should succeed");
        assert_eq!(text, "");
    }

    #[test]
    fn round_trips_the_note_text() {
        let text = "2,xtra,2022-06-24T18:38:31Z,\n1,libp2p,2022-06-24T16:35:15.000Z,2022-06-24T18:35:45.000Z";
        let path = temp_file("timenote_roundtrip.note");

        save_note(&path, text).expect("save should succeed");
        let loaded = load_note(&path).expect("load should succeed");

        assert_eq!(loaded, text);
        let _ = fs::remove_file(path);
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}", name, std::process::id()));
        path
    }
}
