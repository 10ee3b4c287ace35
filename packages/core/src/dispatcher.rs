//! Action dispatch onto the store root.

use std::fs;
use std::path::PathBuf;

use dirstore_sys::{HostProbe, SystemProbe};

use crate::error::ActionError;
use crate::meta::FileMeta;
use crate::path::StoreRoot;
use crate::reply::Reply;
use crate::request::{Action, ActionRequest, Command};

/// Maps one request onto one filesystem operation and a text reply.
///
/// The dispatcher holds no mutable state: the filesystem is the only source of
/// truth, and every call goes straight to it. It is `Send + Sync` and can be
/// shared across request handlers behind an `Arc`.
pub struct Dispatcher {
    root: StoreRoot,
    probe: Box<dyn HostProbe>,
}

impl Dispatcher {
    /// Create a dispatcher that reports on the real host.
    pub fn new(root: StoreRoot) -> Self {
        Self::with_probe(root, SystemProbe::new())
    }

    /// Create a dispatcher with a custom host probe.
    pub fn with_probe(root: StoreRoot, probe: impl HostProbe + 'static) -> Self {
        Self {
            root,
            probe: Box::new(probe),
        }
    }

    pub fn root(&self) -> &StoreRoot {
        &self.root
    }

    /// Run a request to completion. Always produces a reply; failures are
    /// logged and turned into their fixed text.
    pub fn dispatch(&self, request: ActionRequest) -> Reply {
        tracing::debug!(action = %request.action, "dispatching");

        match request
            .into_command()
            .and_then(|command| self.execute(command))
        {
            Ok(reply) => reply,
            Err(error) => {
                error.log();
                Reply::from(error)
            }
        }
    }

    /// Run an already-validated command.
    pub fn execute(&self, command: Command) -> Result<Reply, ActionError> {
        match command {
            Command::Create { name, content } => self.create(&name, &content),
            Command::Read { name } => self.read(&name),
            Command::Delete { name } => self.delete(&name),
            Command::List => self.list(),
            Command::Rename { oldname, newname } => self.rename(&oldname, &newname),
            Command::Meta { name } => self.meta(&name),
            Command::SystemInfo => Ok(Reply::success(self.probe.snapshot().to_string())),
            Command::Help => Ok(Reply::help()),
        }
    }

    fn resolve(&self, action: Action, name: &str) -> Result<PathBuf, ActionError> {
        self.root
            .resolve(name)
            .map_err(|source| ActionError::from_path(action, source))
    }

    fn create(&self, name: &str, content: &str) -> Result<Reply, ActionError> {
        let path = self.resolve(Action::Create, name)?;
        fs::write(&path, content).map_err(|e| ActionError::from_io(Action::Create, e))?;
        Ok(Reply::success(format!("File '{}' created", name)))
    }

    fn read(&self, name: &str) -> Result<Reply, ActionError> {
        let path = self.resolve(Action::Read, name)?;
        let data = fs::read(&path).map_err(|e| ActionError::from_io(Action::Read, e))?;
        Ok(Reply::success(format!(
            "Content:\n\n{}",
            String::from_utf8_lossy(&data)
        )))
    }

    fn delete(&self, name: &str) -> Result<Reply, ActionError> {
        let path = self.resolve(Action::Delete, name)?;
        fs::remove_file(&path).map_err(|e| ActionError::from_io(Action::Delete, e))?;
        Ok(Reply::success(format!("File '{}' deleted", name)))
    }

    fn list(&self) -> Result<Reply, ActionError> {
        let io_err = |e| ActionError::from_io(Action::List, e);

        let mut names = Vec::new();
        for entry in fs::read_dir(self.root.path()).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        Ok(Reply::success(format!("Files:\n\n{}", names.join("\n"))))
    }

    fn rename(&self, oldname: &str, newname: &str) -> Result<Reply, ActionError> {
        let from = self.resolve(Action::Rename, oldname)?;
        let to = self.resolve(Action::Rename, newname)?;
        fs::rename(&from, &to).map_err(|e| ActionError::from_io(Action::Rename, e))?;
        Ok(Reply::success(format!(
            "Renamed '{}' to '{}'",
            oldname, newname
        )))
    }

    fn meta(&self, name: &str) -> Result<Reply, ActionError> {
        let path = self.resolve(Action::Meta, name)?;
        let meta = FileMeta::stat(name, &path).map_err(|e| ActionError::from_io(Action::Meta, e))?;
        Ok(Reply::success(meta.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Outcome;
    use crate::request::Params;
    use crate::HELP_TEXT;
    use chrono::{DateTime, Duration, FixedOffset, Local};
    use dirstore_sys::HostInfo;
    use std::collections::HashSet;

    struct TestDispatcher {
        // Keeps the directory alive for the lifetime of the test.
        dir: tempfile::TempDir,
        dispatcher: Dispatcher,
    }

    impl TestDispatcher {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = StoreRoot::open(dir.path().join("files")).unwrap();
            Self {
                dir,
                dispatcher: Dispatcher::with_probe(root, fixed_host()),
            }
        }

        fn run(&self, action: &str, params: &[(&str, &str)]) -> Reply {
            let mut query: Params = params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            query.insert("action".to_string(), action.to_string());
            self.dispatcher.dispatch(ActionRequest::from_query(query))
        }

        fn file(&self, name: &str) -> PathBuf {
            self.dispatcher.root().path().join(name)
        }
    }

    fn fixed_host() -> HostInfo {
        HostInfo {
            username: "tester".to_string(),
            os_type: "Linux".to_string(),
            arch: "x64".to_string(),
            cpu_cores: 4,
            free_memory_bytes: 1024 * 1024 * 1024,
            uptime_secs: 90,
        }
    }

    #[test]
    fn create_then_read_round_trips() {
        let t = TestDispatcher::new();

        let reply = t.run("create", &[("name", "a.txt"), ("content", "hello world")]);
        assert_eq!(reply.outcome(), Outcome::Success);
        assert_eq!(reply.body(), "File 'a.txt' created");

        let reply = t.run("read", &[("name", "a.txt")]);
        assert_eq!(reply.body(), "Content:\n\nhello world");
    }

    #[test]
    fn create_overwrites_existing_file() {
        let t = TestDispatcher::new();
        t.run("create", &[("name", "a.txt"), ("content", "first version")]);
        t.run("create", &[("name", "a.txt"), ("content", "second")]);

        assert_eq!(fs::read_to_string(t.file("a.txt")).unwrap(), "second");
    }

    #[test]
    fn create_without_content_writes_nothing() {
        let t = TestDispatcher::new();

        let reply = t.run("create", &[("name", "a.txt")]);
        assert_eq!(reply.outcome(), Outcome::Invalid);
        assert_eq!(reply.body(), "Missing filename or content");
        assert!(!t.file("a.txt").exists());

        let reply = t.run("create", &[("name", "a.txt"), ("content", "")]);
        assert_eq!(reply.body(), "Missing filename or content");
        assert!(!t.file("a.txt").exists());
    }

    #[test]
    fn create_without_name() {
        let t = TestDispatcher::new();
        let reply = t.run("create", &[("content", "x")]);
        assert_eq!(reply.body(), "Missing filename or content");
    }

    #[test]
    fn read_missing_file() {
        let t = TestDispatcher::new();
        let reply = t.run("read", &[("name", "ghost.txt")]);
        assert_eq!(reply.outcome(), Outcome::NotFound);
        assert_eq!(reply.body(), "File not found");

        let reply = t.run("read", &[]);
        assert_eq!(reply.body(), "Missing filename");
    }

    #[test]
    fn read_replaces_invalid_utf8() {
        let t = TestDispatcher::new();
        fs::write(t.file("bin"), [b'o', b'k', 0xff]).unwrap();
        let reply = t.run("read", &[("name", "bin")]);
        assert_eq!(reply.body(), "Content:\n\nok\u{fffd}");
    }

    #[test]
    fn delete_removes_file() {
        let t = TestDispatcher::new();
        t.run("create", &[("name", "a.txt"), ("content", "x")]);

        let reply = t.run("delete", &[("name", "a.txt")]);
        assert_eq!(reply.body(), "File 'a.txt' deleted");
        assert!(!t.file("a.txt").exists());
    }

    #[test]
    fn delete_missing_file_fails() {
        let t = TestDispatcher::new();
        let reply = t.run("delete", &[("name", "a.txt")]);
        assert!(!reply.outcome().is_success());
        assert_eq!(reply.body(), "Cannot delete file");

        let reply = t.run("delete", &[]);
        assert_eq!(reply.body(), "Missing filename");
    }

    #[test]
    fn list_empty_store() {
        let t = TestDispatcher::new();
        let reply = t.run("list", &[]);
        assert_eq!(reply.body(), "Files:\n\n");
    }

    #[test]
    fn list_returns_created_files() {
        let t = TestDispatcher::new();
        t.run("create", &[("name", "b.txt"), ("content", "2")]);
        t.run("create", &[("name", "a.txt"), ("content", "1")]);

        let reply = t.run("list", &[]);
        let listing = reply.body().strip_prefix("Files:\n\n").unwrap();
        let names: HashSet<&str> = listing.split('\n').collect();
        assert_eq!(names, HashSet::from(["a.txt", "b.txt"]));
    }

    #[test]
    fn list_fails_when_root_disappears() {
        let t = TestDispatcher::new();
        fs::remove_dir_all(t.dispatcher.root().path()).unwrap();

        let reply = t.run("list", &[]);
        assert_eq!(reply.body(), "Error listing files");
        assert!(!reply.outcome().is_success());
    }

    #[test]
    fn rename_moves_content() {
        let t = TestDispatcher::new();
        t.run("create", &[("name", "old.txt"), ("content", "payload")]);

        let reply = t.run("rename", &[("oldname", "old.txt"), ("newname", "new.txt")]);
        assert_eq!(reply.body(), "Renamed 'old.txt' to 'new.txt'");

        assert_eq!(
            t.run("read", &[("name", "new.txt")]).body(),
            "Content:\n\npayload"
        );
        assert_eq!(t.run("read", &[("name", "old.txt")]).body(), "File not found");
    }

    #[test]
    fn rename_failures() {
        let t = TestDispatcher::new();

        let reply = t.run("rename", &[("oldname", "a.txt")]);
        assert_eq!(reply.body(), "Missing oldname or newname");

        let reply = t.run("rename", &[("oldname", "a.txt"), ("newname", "b.txt")]);
        assert_eq!(reply.body(), "Rename failed");
    }

    #[test]
    fn traversal_is_rejected_before_io() {
        let t = TestDispatcher::new();
        let outside = t.dir.path().join("secret");
        fs::write(&outside, "top secret").unwrap();

        let reply = t.run("read", &[("name", "../secret")]);
        assert_eq!(reply.outcome(), Outcome::Invalid);
        assert_eq!(reply.body(), "Invalid filename");

        let reply = t.run("delete", &[("name", "../secret")]);
        assert_eq!(reply.outcome(), Outcome::Invalid);
        assert!(outside.exists());

        let reply = t.run("create", &[("name", "../secret"), ("content", "pwned")]);
        assert_eq!(reply.outcome(), Outcome::Invalid);
        assert_eq!(fs::read_to_string(&outside).unwrap(), "top secret");

        let reply = t.run("rename", &[("oldname", "../secret"), ("newname", "mine")]);
        assert_eq!(reply.body(), "Invalid oldname or newname");
        assert!(outside.exists());

        let reply = t.run("meta", &[("name", "/etc/passwd")]);
        assert_eq!(reply.body(), "Invalid filename");
    }

    #[test]
    fn meta_reports_size_and_times() {
        let t = TestDispatcher::new();
        let before = Local::now() - Duration::seconds(2);
        t.run("create", &[("name", "a.txt"), ("content", "héllo")]);
        let after = Local::now() + Duration::seconds(2);

        let reply = t.run("meta", &[("name", "a.txt")]);
        assert_eq!(reply.outcome(), Outcome::Success);

        let body = reply.body();
        assert!(body.contains("File: a.txt\n"));
        assert!(body.contains(&format!("Size: {} bytes\n", "héllo".len())));

        let stamp = |label: &str| -> DateTime<FixedOffset> {
            let line = body
                .lines()
                .find_map(|line| line.strip_prefix(label))
                .unwrap();
            DateTime::parse_from_str(line, crate::meta::TIMESTAMP_FORMAT).unwrap()
        };
        for label in ["Created: ", "Modified: "] {
            let at = stamp(label);
            assert!(at >= before && at <= after, "{label}{at} out of range");
        }
    }

    #[test]
    fn meta_missing_file() {
        let t = TestDispatcher::new();
        assert_eq!(t.run("meta", &[("name", "nope")]).body(), "File not found");
        assert_eq!(t.run("meta", &[]).body(), "Missing filename");
    }

    #[test]
    fn systeminfo_uses_probe() {
        let t = TestDispatcher::new();
        let reply = t.run("systeminfo", &[]);
        assert_eq!(reply.outcome(), Outcome::Success);
        assert_eq!(reply.body(), fixed_host().to_string());
        assert!(reply.body().contains("Free RAM: 1024.00 MB"));
        assert!(reply.body().contains("Uptime: 1.5 minutes"));
    }

    #[test]
    fn unknown_action_returns_help() {
        let t = TestDispatcher::new();
        for action in ["bogus", "", "LIST"] {
            let reply = t.run(action, &[]);
            assert_eq!(reply.outcome(), Outcome::Help);
            assert_eq!(reply.body(), HELP_TEXT);
        }

        let reply = t
            .dispatcher
            .dispatch(ActionRequest::from_query(Params::new()));
        assert_eq!(
            reply.body(),
            "Available actions: create, read, delete, list, rename, meta, systeminfo"
        );
    }
}
