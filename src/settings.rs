//! User-editable repository selection with change notifications.

use tokio::sync::watch;

use crate::models::RepositoryCoordinates;

/// Holds the current [`RepositoryCoordinates`] and notifies subscribers
/// whenever an edit actually changes them.
#[derive(Debug)]
pub struct RepoSettings {
    sender: watch::Sender<RepositoryCoordinates>,
}

impl RepoSettings {
    pub fn new(initial: RepositoryCoordinates) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn current(&self) -> RepositoryCoordinates {
        self.sender.borrow().clone()
    }

    /// A receiver that has already seen the current value; its next
    /// `changed()` fires on the next edit.
    pub fn subscribe(&self) -> watch::Receiver<RepositoryCoordinates> {
        self.sender.subscribe()
    }

    pub fn set_account(&self, account: impl Into<String>) -> bool {
        let account = account.into();
        self.edit(|coords| replace(&mut coords.account, account))
    }

    pub fn set_repository(&self, repository: impl Into<String>) -> bool {
        let repository = repository.into();
        self.edit(|coords| replace(&mut coords.repository, repository))
    }

    /// Replace both fields as one configuration event.
    pub fn update(&self, coordinates: RepositoryCoordinates) -> bool {
        self.edit(|coords| {
            if *coords == coordinates {
                return false;
            }
            *coords = coordinates;
            true
        })
    }

    fn edit(&self, apply: impl FnOnce(&mut RepositoryCoordinates) -> bool) -> bool {
        let changed = self.sender.send_if_modified(apply);
        if changed {
            let current = self.current();
            tracing::info!(coordinates = %current, "repository settings changed");
        }
        changed
    }
}

impl Default for RepoSettings {
    fn default() -> Self {
        Self::new(RepositoryCoordinates::default())
    }
}

fn replace(field: &mut String, value: String) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}
