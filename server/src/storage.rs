//! Game persistence on top of a plain key-value backend.
//!
//! Games are stored as JSON documents keyed by `(owner_id, game_id)`. The backends only move
//! bytes around; revision checks happen in [`KvGameRepository`], under its own write lock.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use hashbrown::HashMap;
use sweeper_core::{Game, GameRepository, RepositoryError};

use crate::error::StorageError;

const MAX_KEY_LEN: usize = 64;

/// Owner and game ids double as storage keys: `[A-Za-z0-9_-]`, at most 64 bytes.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn check_key(key: &str) -> Result<(), StorageError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

pub trait KvBackend: Send + Sync {
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn put(&self, owner_id: &str, game_id: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Every value stored for `owner_id`, ordered by game id.
    fn list(&self, owner_id: &str) -> Result<Vec<Vec<u8>>, StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries
            .get(&(owner_id.to_owned(), game_id.to_owned()))
            .cloned())
    }

    fn put(&self, owner_id: &str, game_id: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert((owner_id.to_owned(), game_id.to_owned()), value);
        Ok(())
    }

    fn list(&self, owner_id: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        let mut owned: Vec<_> = entries
            .iter()
            .filter(|((owner, _), _)| owner == owner_id)
            .map(|((_, game), value)| (game.as_str(), value))
            .collect();
        owned.sort_unstable_by_key(|(game, _)| *game);
        Ok(owned.into_iter().map(|(_, value)| value.clone()).collect())
    }
}

/// One file per game under `<root>/<owner_id>/<game_id>.json`.
#[derive(Debug)]
pub struct DirBackend {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl DirBackend {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(StorageError::io(&root))?;
        log::info!("Storing games under {}", root.display());
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn owner_dir(&self, owner_id: &str) -> Result<PathBuf, StorageError> {
        check_key(owner_id)?;
        Ok(self.root.join(owner_id))
    }

    fn game_path(&self, owner_id: &str, game_id: &str) -> Result<PathBuf, StorageError> {
        check_key(game_id)?;
        Ok(self.owner_dir(owner_id)?.join(format!("{game_id}.json")))
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StorageError::io(path)(err)),
    }
}

impl KvBackend for DirBackend {
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Vec<u8>>, StorageError> {
        read_optional(&self.game_path(owner_id, game_id)?)
    }

    fn put(&self, owner_id: &str, game_id: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.game_path(owner_id, game_id)?;
        let dir = self.owner_dir(owner_id)?;
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        fs::create_dir_all(&dir).map_err(StorageError::io(&dir))?;
        let mut file = fs::File::create(&tmp).map_err(StorageError::io(&tmp))?;
        file.write_all(&value).map_err(StorageError::io(&tmp))?;
        file.sync_all().map_err(StorageError::io(&tmp))?;
        fs::rename(&tmp, &path).map_err(StorageError::io(&path))?;
        Ok(())
    }

    fn list(&self, owner_id: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let dir = self.owner_dir(owner_id)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::io(&dir)(err)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(StorageError::io(&dir))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut values = Vec::with_capacity(paths.len());
        for path in paths {
            // Removed between listing and reading.
            if let Some(bytes) = read_optional(&path)? {
                values.push(bytes);
            }
        }
        Ok(values)
    }
}

/// [`GameRepository`] over any [`KvBackend`], enforcing the revision contract on save.
#[derive(Debug)]
pub struct KvGameRepository<B> {
    backend: B,
    save_lock: Mutex<()>,
}

impl<B: KvBackend> KvGameRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            save_lock: Mutex::new(()),
        }
    }

    fn load(&self, owner_id: &str, game_id: &str) -> Result<Option<Game>, StorageError> {
        self.backend
            .get(owner_id, game_id)?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(StorageError::from)
    }

    fn store(&self, game: &Game) -> Result<(), StorageError> {
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let found = self
            .load(game.owner_id(), game.id())?
            .map_or(0, |stored| stored.revision());
        let expected = game.revision().wrapping_sub(1);
        if found != expected {
            return Err(StorageError::Conflict { expected, found });
        }

        let bytes = serde_json::to_vec(game)?;
        self.backend.put(game.owner_id(), game.id(), bytes)?;
        log::trace!(
            "Stored game {} of {} at revision {}",
            game.id(),
            game.owner_id(),
            game.revision()
        );
        Ok(())
    }
}

impl<B: KvBackend> GameRepository for KvGameRepository<B> {
    fn get(&self, owner_id: &str, game_id: &str) -> Result<Option<Game>, RepositoryError> {
        Ok(self.load(owner_id, game_id)?)
    }

    fn get_all(&self, owner_id: &str) -> Result<Vec<Game>, RepositoryError> {
        let games = self
            .backend
            .list(owner_id)?
            .iter()
            .map(|bytes| serde_json::from_slice(bytes))
            .collect::<Result<Vec<Game>, _>>()
            .map_err(StorageError::from)?;
        Ok(games)
    }

    fn save(&self, game: &Game) -> Result<(), RepositoryError> {
        Ok(self.store(game)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::GameSettings;

    fn game(owner_id: &str, id: &str, revision: u64) -> Game {
        let game = Game::new(id, owner_id, GameSettings::new(2, 3, 1).unwrap()).unwrap();
        let mut json = serde_json::to_value(&game).unwrap();
        json["revision"] = revision.into();
        serde_json::from_value(json).unwrap()
    }

    fn exercise<B: KvBackend>(repository: KvGameRepository<B>) {
        assert_eq!(repository.get("alice", "abc").unwrap(), None);
        assert!(repository.get_all("alice").unwrap().is_empty());

        repository.save(&game("alice", "abc", 1)).unwrap();
        repository.save(&game("alice", "abc", 2)).unwrap();
        repository.save(&game("alice", "aaa", 1)).unwrap();
        repository.save(&game("bob", "abc", 1)).unwrap();

        assert_eq!(
            repository.get("alice", "abc").unwrap(),
            Some(game("alice", "abc", 2))
        );

        let ids: Vec<_> = repository
            .get_all("alice")
            .unwrap()
            .iter()
            .map(|game| game.id().to_owned())
            .collect();
        assert_eq!(ids, ["aaa", "abc"]);
        assert_eq!(repository.get_all("bob").unwrap().len(), 1);
        assert!(repository.get_all("carol").unwrap().is_empty());
    }

    #[test]
    fn memory_backend_round_trips_games() {
        exercise(KvGameRepository::new(MemoryBackend::new()));
    }

    #[test]
    fn dir_backend_round_trips_games() {
        let dir = tempfile::tempdir().unwrap();
        let repository = KvGameRepository::new(DirBackend::open(dir.path()).unwrap());
        exercise(repository);

        assert!(dir.path().join("alice").join("abc.json").is_file());
        assert!(!dir.path().join("alice").join("abc.json.tmp").exists());
    }

    #[test]
    fn dir_backend_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        KvGameRepository::new(DirBackend::open(dir.path()).unwrap())
            .save(&game("alice", "abc", 1))
            .unwrap();

        let reopened = KvGameRepository::new(DirBackend::open(dir.path()).unwrap());
        assert_eq!(
            reopened.get("alice", "abc").unwrap(),
            Some(game("alice", "abc", 1))
        );
    }

    #[test]
    fn stale_saves_are_rejected() {
        let repository = KvGameRepository::new(MemoryBackend::new());

        assert_eq!(
            repository.save(&game("alice", "abc", 2)),
            Err(RepositoryError::Conflict {
                expected: 1,
                found: 0
            })
        );

        repository.save(&game("alice", "abc", 1)).unwrap();
        assert_eq!(
            repository.save(&game("alice", "abc", 1)),
            Err(RepositoryError::Conflict {
                expected: 0,
                found: 1
            })
        );
        assert_eq!(
            repository.get("alice", "abc").unwrap().map(|g| g.revision()),
            Some(1)
        );
    }

    #[test]
    fn malformed_records_are_marshal_errors() {
        let backend = MemoryBackend::new();
        backend.put("alice", "abc", b"{not json".to_vec()).unwrap();
        let repository = KvGameRepository::new(backend);

        assert!(matches!(
            repository.get("alice", "abc"),
            Err(RepositoryError::Marshal(_))
        ));
        assert!(matches!(
            repository.get_all("alice"),
            Err(RepositoryError::Marshal(_))
        ));
    }

    #[test]
    fn dir_backend_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DirBackend::open(dir.path()).unwrap();

        assert!(matches!(
            backend.get("../alice", "abc"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            backend.put("alice", "a/b", Vec::new()),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn key_charset() {
        assert!(is_valid_key("alice_01-x"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("al ice"));
        assert!(!is_valid_key(".."));
        assert!(!is_valid_key(&"a".repeat(MAX_KEY_LEN + 1)));
    }
}
