//! HTTP basic-auth challenge handling
//!
//! When the page server asks for credentials the shell answers with the
//! cached pair if it has a complete one, and otherwise asks the host to
//! show its login dialog. Whatever the user enters is used immediately and
//! remembered for the next challenge.

use tracing::{debug, warn};

use crate::core::credentials::{BasicAuth, CredentialStore};

/// A server's request for credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    pub host: String,
    pub realm: String,
}

/// Answer to give the browser component
#[derive(Debug, Clone)]
pub enum AuthDecision {
    /// Continue the request with these credentials
    Proceed(BasicAuth),
    /// Show the login dialog for this challenge
    Prompt(AuthChallenge),
    /// Abort the request
    Cancel,
}

/// Answers basic-auth challenges from the credential store
pub struct HttpAuthBroker<'a> {
    store: &'a CredentialStore,
}

impl<'a> HttpAuthBroker<'a> {
    pub fn new(store: &'a CredentialStore) -> Self {
        Self { store }
    }

    /// Decide how to answer a challenge
    ///
    /// A keyring that cannot be read is treated as having no credentials.
    pub fn on_challenge(&self, challenge: AuthChallenge) -> AuthDecision {
        match self.store.get() {
            Ok(Some(auth)) if auth.is_complete() => {
                debug!(
                    host = %challenge.host,
                    realm = %challenge.realm,
                    "Answering auth challenge from store"
                );
                AuthDecision::Proceed(auth)
            }
            Ok(_) => AuthDecision::Prompt(challenge),
            Err(e) => {
                warn!("Cannot read stored credentials: {}", e);
                AuthDecision::Prompt(challenge)
            }
        }
    }

    /// The user confirmed the login dialog
    ///
    /// The credentials are used even if they cannot be persisted.
    pub fn submit(&self, username: &str, password: &str) -> AuthDecision {
        let auth = BasicAuth::new(username, password);
        if let Err(e) = self.store.store(&auth) {
            warn!("Cannot remember credentials: {}", e);
        }
        AuthDecision::Proceed(auth)
    }

    /// The user dismissed the login dialog
    pub fn cancel(&self) -> AuthDecision {
        AuthDecision::Cancel
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::core::credentials::tests::mock_store;

    fn challenge() -> AuthChallenge {
        AuthChallenge {
            host: "tavern.local".into(),
            realm: "Restricted".into(),
        }
    }

    #[test]
    fn test_prompts_without_credentials() {
        let store = mock_store();
        let broker = HttpAuthBroker::new(&store);
        match broker.on_challenge(challenge()) {
            AuthDecision::Prompt(c) => assert_eq!(c, challenge()),
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn test_submit_then_challenge_proceeds() {
        let store = mock_store();
        let broker = HttpAuthBroker::new(&store);

        match broker.submit("alice", "s3cret") {
            AuthDecision::Proceed(auth) => assert_eq!(auth.username, "alice"),
            other => panic!("unexpected decision {:?}", other),
        }

        match broker.on_challenge(challenge()) {
            AuthDecision::Proceed(auth) => {
                assert_eq!(auth.username, "alice");
                assert_eq!(auth.password.expose_secret(), "s3cret");
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_credentials_prompt_again() {
        let store = mock_store();
        let broker = HttpAuthBroker::new(&store);
        broker.submit("alice", "");
        assert!(matches!(broker.on_challenge(challenge()), AuthDecision::Prompt(_)));
    }

    #[test]
    fn test_cancel() {
        let store = mock_store();
        assert!(matches!(HttpAuthBroker::new(&store).cancel(), AuthDecision::Cancel));
    }
}
