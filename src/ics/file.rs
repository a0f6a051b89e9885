use std::{
    collections::HashSet,
    fs::{self, Permissions},
    io::{ErrorKind, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{core::interval::FloatingInterval, ics::CalendarEvent, prelude::*};

pub const HEADER: &str = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//octocal//Octopus Agile//EN\n";
pub const FOOTER: &str = "END:VCALENDAR\n";

/// Events already present in a calendar file.
#[derive(Default)]
pub struct CalendarFile {
    intervals: HashSet<FloatingInterval>,

    /// Every complete `VEVENT` block, byte-for-byte and in file order.
    blocks: String,
}

impl CalendarFile {
    /// Read the calendar, treating a missing file as an empty one.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("not found, starting an empty calendar");
                Ok(Self::default())
            }
            Err(error) => Err(Error::file_io(path, error)),
        }
    }

    /// Scan the text line by line.
    ///
    /// Each block's `DTSTART` and `DTEND` are tracked from `BEGIN:VEVENT` to `END:VEVENT`,
    /// and the block is kept verbatim. A block lacking either field is kept but contributes
    /// no interval. An unterminated trailing block is dropped.
    pub fn parse(text: &str) -> Self {
        let mut this = Self::default();
        let mut block: Option<String> = None;
        let mut start = None;
        let mut end = None;

        for line in text.split_inclusive('\n') {
            if line.starts_with("BEGIN:VEVENT") {
                block = Some(String::new());
                start = None;
                end = None;
            }
            let Some(current) = block.as_mut() else {
                continue;
            };
            current.push_str(line);

            let value = line.trim_end();
            if let Some(value) = value.strip_prefix("DTSTART:") {
                start = Some(value);
            } else if let Some(value) = value.strip_prefix("DTEND:") {
                end = Some(value);
            }

            if line.starts_with("END:VEVENT") {
                if let (Some(start), Some(end)) = (start.take(), end.take()) {
                    this.intervals.insert(FloatingInterval::new(start, end));
                } else {
                    warn!(block = current.as_str(), "event without start or end");
                }
                this.blocks.push_str(current);
                if !current.ends_with('\n') {
                    this.blocks.push('\n');
                }
                block = None;
            }
        }

        if let Some(block) = block {
            warn!(%block, "dropped an unterminated event");
        }
        this
    }

    /// Number of distinct event intervals found in the file.
    #[must_use]
    pub fn n_events(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub fn contains(&self, interval: &FloatingInterval) -> bool {
        self.intervals.contains(interval)
    }

    pub fn insert(&mut self, interval: FloatingInterval) {
        self.intervals.insert(interval);
    }

    /// Preserved blocks followed by the new events, wrapped into the calendar header and footer.
    #[must_use]
    pub fn render(&self, new_events: &[CalendarEvent]) -> String {
        let mut contents = String::from(HEADER);
        contents.push_str(&self.blocks);
        for event in new_events {
            contents.push_str(&event.to_string());
        }
        contents.push_str(FOOTER);
        contents
    }

    /// Replace the file contents in full via a temporary file in the same directory.
    ///
    /// A symlinked calendar is written through the link. The previous file's permissions are
    /// kept, and a new file is readable by everyone.
    #[instrument(skip_all, fields(path = %path.display(), n_bytes = contents.len()))]
    pub fn persist(path: &Path, contents: &str) -> Result<(), Error> {
        let (target, permissions) = match fs::canonicalize(path) {
            Ok(target) => {
                let permissions = fs::metadata(&target)
                    .map_err(|error| Error::file_io(path, error))?
                    .permissions();
                (target, Some(permissions))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                (path.to_path_buf(), default_permissions())
            }
            Err(error) => return Err(Error::file_io(path, error)),
        };
        let directory = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file =
            NamedTempFile::new_in(directory).map_err(|error| Error::file_io(path, error))?;
        file.write_all(contents.as_bytes()).map_err(|error| Error::file_io(path, error))?;
        if let Some(permissions) = permissions {
            file.as_file()
                .set_permissions(permissions)
                .map_err(|error| Error::file_io(path, error))?;
        }
        file.persist(&target).map_err(|error| Error::file_io(path, error.error))?;
        info!(target = %target.display(), "saved");
        Ok(())
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
const fn default_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const TWO_EVENTS: &str = "BEGIN:VCALENDAR\n\
        VERSION:2.0\n\
        PRODID:-//Your Product//Your App//EN\n\
        BEGIN:VEVENT\n\
        UID:20240301T090000123456Z\n\
        DTSTAMP:20240301T090000Z\n\
        DTSTART:20240301T000000\n\
        DTEND:20240301T003000\n\
        SUMMARY:\u{1F7E2} 5.0p\n\
        END:VEVENT\n\
        BEGIN:VEVENT\n\
        UID:20240301T090000123457Z\n\
        DTSTAMP:20240301T090000Z\n\
        DTSTART:20240301T003000\n\
        DTEND:20240301T010000\n\
        SUMMARY:\u{1F534} 25.0p\n\
        END:VEVENT\n\
        END:VCALENDAR\n";

    #[test]
    fn parse_ok() {
        let file = CalendarFile::parse(TWO_EVENTS);
        assert_eq!(file.n_events(), 2);
        assert!(file.contains(&FloatingInterval::new("20240301T000000", "20240301T003000")));
        assert!(file.contains(&FloatingInterval::new("20240301T003000", "20240301T010000")));
        assert!(file.blocks.starts_with("BEGIN:VEVENT\nUID:20240301T090000123456Z\n"));
        assert!(file.blocks.ends_with("SUMMARY:\u{1F534} 25.0p\nEND:VEVENT\n"));
        assert!(!file.blocks.contains("VCALENDAR"));
    }

    #[test]
    fn parse_keeps_crlf_ok() {
        let block = "BEGIN:VEVENT\r\nUID:x\r\nDTSTART:20240301T000000\r\nDTEND:20240301T003000\r\nEND:VEVENT\r\n";
        let file = CalendarFile::parse(&format!("BEGIN:VCALENDAR\r\n{block}END:VCALENDAR\r\n"));
        assert_eq!(file.blocks, block);
        assert!(file.contains(&FloatingInterval::new("20240301T000000", "20240301T003000")));
    }

    #[test]
    fn incomplete_block_is_kept_without_interval() {
        let text = "BEGIN:VEVENT\nDTSTART:20240301T000000\nEND:VEVENT\n\
            BEGIN:VEVENT\nDTEND:20240301T010000\nEND:VEVENT\n";
        let file = CalendarFile::parse(text);
        assert_eq!(file.n_events(), 0);
        assert_eq!(file.blocks, text);
    }

    #[test]
    fn unterminated_block_is_dropped() {
        let text = "BEGIN:VEVENT\nDTSTART:20240301T000000\nDTEND:20240301T003000\nEND:VEVENT\n\
            BEGIN:VEVENT\nDTSTART:20240301T003000\nDTEND:20240301T010000\n";
        let file = CalendarFile::parse(text);
        assert_eq!(file.n_events(), 1);
        assert!(!file.blocks.contains("T010000"));
    }

    #[test]
    fn missing_trailing_newline_ok() {
        let file = CalendarFile::parse("BEGIN:VEVENT\nDTSTART:a\nDTEND:b\nEND:VEVENT");
        assert_eq!(file.blocks, "BEGIN:VEVENT\nDTSTART:a\nDTEND:b\nEND:VEVENT\n");
    }

    #[test]
    fn render_empty_ok() {
        assert_eq!(CalendarFile::default().render(&[]), format!("{HEADER}{FOOTER}"));
    }

    #[test]
    fn load_missing_file_ok() -> Result {
        let directory = tempdir()?;
        let file = CalendarFile::load(&directory.path().join("missing.ics"))?;
        assert_eq!(file.n_events(), 0);
        assert!(file.blocks.is_empty());
        Ok(())
    }

    #[test]
    fn load_directory_err() -> Result {
        let directory = tempdir()?;
        let result = CalendarFile::load(directory.path());
        assert!(matches!(result, Err(Error::FileIo { .. })));
        Ok(())
    }

    #[test]
    fn persist_replaces_contents_ok() -> Result {
        let directory = tempdir()?;
        let path = directory.path().join("agile.ics");
        fs::write(&path, "previous contents that are longer than the new ones")?;
        CalendarFile::persist(&path, TWO_EVENTS)?;
        assert_eq!(fs::read_to_string(&path)?, TWO_EVENTS);
        assert_eq!(fs::read_dir(directory.path())?.count(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn persist_new_file_is_world_readable() -> Result {
        use std::os::unix::fs::PermissionsExt;

        let directory = tempdir()?;
        let path = directory.path().join("agile.ics");
        CalendarFile::persist(&path, TWO_EVENTS)?;
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o644);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn persist_keeps_existing_permissions() -> Result {
        use std::os::unix::fs::PermissionsExt;

        let directory = tempdir()?;
        let path = directory.path().join("agile.ics");
        fs::write(&path, "")?;
        fs::set_permissions(&path, Permissions::from_mode(0o640))?;
        CalendarFile::persist(&path, TWO_EVENTS)?;
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o640);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn persist_writes_through_symlink() -> Result {
        let directory = tempdir()?;
        let real = directory.path().join("real.ics");
        let link = directory.path().join("link.ics");
        fs::write(&real, "")?;
        std::os::unix::fs::symlink(&real, &link)?;

        CalendarFile::persist(&link, TWO_EVENTS)?;
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real)?, TWO_EVENTS);
        assert_eq!(fs::read_to_string(&link)?, TWO_EVENTS);
        Ok(())
    }
}
