//! Session service: thin CRUD passthroughs plus the roster mutation
//! protocol, the one place in the domain model with real invariants.

use std::sync::Arc;

use log::debug;
use savasana_commons::{Session, SessionId, UserId};

use crate::error::{SessionError, SessionResult};
use crate::store::{SessionStore, UserStore};

/// Service over the session and user stores.
pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionStore>, users: Arc<dyn UserStore>) -> Self {
        Self { sessions, users }
    }

    /// Persist a new session.
    pub async fn create(&self, session: Session) -> SessionResult<Session> {
        self.sessions.save(session).await
    }

    pub async fn find_all(&self) -> SessionResult<Vec<Session>> {
        self.sessions.find_all().await
    }

    /// Look up a session. An absent row is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: SessionId) -> SessionResult<Option<Session>> {
        self.sessions.find_by_id(id).await
    }

    /// Replace the session stored under `id` with `session`, whatever id
    /// the incoming record carried.
    pub async fn update(&self, id: SessionId, mut session: Session) -> SessionResult<Session> {
        session.id = id;
        self.sessions.save(session).await
    }

    pub async fn delete(&self, id: SessionId) -> SessionResult<()> {
        self.sessions.delete_by_id(id).await
    }

    /// Add `user_id` to the session's roster.
    ///
    /// Checks run in a fixed order so error precedence is deterministic:
    /// missing session, then missing user, then duplicate membership.
    ///
    /// The membership check and the save are not atomic: two concurrent
    /// joins for the same (session, user) pair can both pass the check.
    /// At-most-once membership holds only if the store serializes saves or
    /// enforces a uniqueness constraint on the roster.
    ///
    /// # Errors
    /// - `SessionError::NotFound` if the session or the user is absent
    /// - `SessionError::BadRequest` if the user already participates
    pub async fn join(&self, session_id: SessionId, user_id: UserId) -> SessionResult<()> {
        let mut session = self.get_existing(session_id).await?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| SessionError::NotFound(format!("user {} not found", user_id)))?;

        if session.has_participant(user_id) {
            return Err(SessionError::BadRequest(format!(
                "user {} already participates in session {}",
                user_id, session_id
            )));
        }

        session.participants.push(user_id);
        self.sessions.save(session).await?;
        debug!("user {} joined session {}", user_id, session_id);
        Ok(())
    }

    /// Remove `user_id` from the session's roster.
    ///
    /// Only roster membership matters here; no user-entity lookup is made.
    ///
    /// # Errors
    /// - `SessionError::NotFound` if the session is absent
    /// - `SessionError::BadRequest` if the user is not on the roster
    pub async fn leave(&self, session_id: SessionId, user_id: UserId) -> SessionResult<()> {
        let mut session = self.get_existing(session_id).await?;

        if !session.has_participant(user_id) {
            return Err(SessionError::BadRequest(format!(
                "user {} does not participate in session {}",
                user_id, session_id
            )));
        }

        session.participants.retain(|&id| id != user_id);
        self.sessions.save(session).await?;
        debug!("user {} left session {}", user_id, session_id);
        Ok(())
    }

    async fn get_existing(&self, session_id: SessionId) -> SessionResult<Session> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| SessionError::NotFound(format!("session {} not found", session_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use savasana_commons::User;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct InMemorySessionStore {
        rows: Mutex<HashMap<SessionId, Session>>,
        saves: AtomicUsize,
    }

    impl InMemorySessionStore {
        fn new(sessions: Vec<Session>) -> Arc<Self> {
            Arc::new(Self {
                rows: Mutex::new(sessions.into_iter().map(|s| (s.id, s)).collect()),
                saves: AtomicUsize::new(0),
            })
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        fn roster(&self, id: SessionId) -> Vec<UserId> {
            self.rows.lock().unwrap()[&id].participants.clone()
        }
    }

    #[async_trait]
    impl SessionStore for InMemorySessionStore {
        async fn find_by_id(&self, id: SessionId) -> SessionResult<Option<Session>> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> SessionResult<Vec<Session>> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn save(&self, session: Session) -> SessionResult<Session> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().unwrap().insert(session.id, session.clone());
            Ok(session)
        }

        async fn delete_by_id(&self, id: SessionId) -> SessionResult<()> {
            self.rows.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    struct InMemoryUserStore {
        rows: Mutex<HashMap<UserId, User>>,
        lookups: AtomicUsize,
    }

    impl InMemoryUserStore {
        fn new(users: Vec<User>) -> Arc<Self> {
            Arc::new(Self {
                rows: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
                lookups: AtomicUsize::new(0),
            })
        }

        fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn find_by_id(&self, id: UserId) -> SessionResult<Option<User>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }
    }

    fn test_session(id: i64) -> Session {
        Session::new(SessionId::new(id), "Yoga Session", Utc::now(), "Relax")
    }

    fn test_user(id: i64) -> User {
        User::new(UserId::new(id), "test@test.com", "John", "Doe", "hash", false)
    }

    fn service(
        sessions: &Arc<InMemorySessionStore>,
        users: &Arc<InMemoryUserStore>,
    ) -> SessionService {
        SessionService::new(sessions.clone(), users.clone())
    }

    // ---------------- CRUD passthroughs ----------------

    #[tokio::test]
    async fn test_create_saves_session() {
        let sessions = InMemorySessionStore::new(vec![]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let created = svc.create(test_session(1)).await.unwrap();
        assert_eq!(created.id, SessionId::new(1));
        assert_eq!(sessions.save_count(), 1);
    }

    #[tokio::test]
    async fn test_find_all_returns_every_session() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let all = svc.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let found = svc.get_by_id(SessionId::new(1)).await.unwrap();
        assert_eq!(found.unwrap().id, SessionId::new(1));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none_not_error() {
        let sessions = InMemorySessionStore::new(vec![]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let found = svc.get_by_id(SessionId::new(1)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_stamps_the_path_id() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        // Incoming record carries a different id; the path id wins.
        let incoming = test_session(99);
        let updated = svc.update(SessionId::new(1), incoming).await.unwrap();
        assert_eq!(updated.id, SessionId::new(1));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        svc.delete(SessionId::new(1)).await.unwrap();
        assert!(svc.get_by_id(SessionId::new(1)).await.unwrap().is_none());
    }

    // ---------------- join ----------------

    #[tokio::test]
    async fn test_join_appends_and_saves() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![test_user(7)]);
        let svc = service(&sessions, &users);

        svc.join(SessionId::new(1), UserId::new(7)).await.unwrap();

        assert_eq!(sessions.roster(SessionId::new(1)), vec![UserId::new(7)]);
        assert_eq!(sessions.save_count(), 1);
    }

    #[tokio::test]
    async fn test_join_missing_session_is_not_found_without_user_lookup() {
        let sessions = InMemorySessionStore::new(vec![]);
        let users = InMemoryUserStore::new(vec![test_user(7)]);
        let svc = service(&sessions, &users);

        let result = svc.join(SessionId::new(1), UserId::new(7)).await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert_eq!(users.lookup_count(), 0);
        assert_eq!(sessions.save_count(), 0);
    }

    #[tokio::test]
    async fn test_join_missing_user_is_not_found() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let result = svc.join(SessionId::new(1), UserId::new(7)).await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert_eq!(sessions.save_count(), 0);
    }

    #[tokio::test]
    async fn test_join_duplicate_is_bad_request_and_roster_unchanged() {
        let mut booked = test_session(1);
        booked.participants.push(UserId::new(7));
        let sessions = InMemorySessionStore::new(vec![booked]);
        let users = InMemoryUserStore::new(vec![test_user(7)]);
        let svc = service(&sessions, &users);

        let result = svc.join(SessionId::new(1), UserId::new(7)).await;

        assert!(matches!(result, Err(SessionError::BadRequest(_))));
        assert_eq!(sessions.roster(SessionId::new(1)), vec![UserId::new(7)]);
        assert_eq!(sessions.save_count(), 0);
    }

    #[tokio::test]
    async fn test_join_error_precedence_session_before_user() {
        // Both entities missing: the session check wins.
        let sessions = InMemorySessionStore::new(vec![]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let result = svc.join(SessionId::new(1), UserId::new(7)).await;

        match result {
            Err(SessionError::NotFound(msg)) => assert!(msg.contains("session")),
            other => panic!("expected NotFound for the session, got {:?}", other),
        }
    }

    // ---------------- leave ----------------

    #[tokio::test]
    async fn test_leave_removes_and_saves() {
        let mut booked = test_session(1);
        booked.participants.push(UserId::new(7));
        let sessions = InMemorySessionStore::new(vec![booked]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        svc.leave(SessionId::new(1), UserId::new(7)).await.unwrap();

        assert!(sessions.roster(SessionId::new(1)).is_empty());
        assert_eq!(sessions.save_count(), 1);
        // Leave never consults the user store.
        assert_eq!(users.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_leave_missing_session_is_not_found() {
        let sessions = InMemorySessionStore::new(vec![]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let result = svc.leave(SessionId::new(1), UserId::new(7)).await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_leave_non_member_is_bad_request_and_roster_unchanged() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![]);
        let svc = service(&sessions, &users);

        let result = svc.leave(SessionId::new(1), UserId::new(7)).await;

        assert!(matches!(result, Err(SessionError::BadRequest(_))));
        assert_eq!(sessions.save_count(), 0);
    }

    #[tokio::test]
    async fn test_join_leave_sequence_is_idempotent_by_rejection() {
        let sessions = InMemorySessionStore::new(vec![test_session(1)]);
        let users = InMemoryUserStore::new(vec![test_user(7)]);
        let svc = service(&sessions, &users);
        let (s, u) = (SessionId::new(1), UserId::new(7));

        svc.join(s, u).await.unwrap();
        assert!(matches!(svc.join(s, u).await, Err(SessionError::BadRequest(_))));
        svc.leave(s, u).await.unwrap();
        assert!(matches!(svc.leave(s, u).await, Err(SessionError::BadRequest(_))));
        assert!(sessions.roster(s).is_empty());
    }
}
