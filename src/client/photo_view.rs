//! Photo detail view: state, actions and the reducer that connects them

use super::api::ApiClient;
use crate::photos::{CommentReceipt, LikeReceipt, Photo};

/// Everything the photo view shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoViewState {
    pub photo: Option<Photo>,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Action {
    FetchStarted,
    Fetched(Photo),
    Liked(LikeReceipt),
    Commented(CommentReceipt),
    Failed(String),
    ResetMessage,
}

impl PhotoViewState {
    /// Apply one action. Pure; the only place the state changes.
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::Fetched(photo) => {
                self.loading = false;
                self.error = None;
                self.photo = Some(photo);
            }
            Action::Liked(receipt) => {
                if let Some(photo) = self.photo.as_mut().filter(|p| p.id == receipt.photo_id) {
                    if !photo.likes.contains(&receipt.user_id) {
                        photo.likes.push(receipt.user_id);
                    }
                }
                self.error = None;
                self.message = Some(receipt.message);
            }
            Action::Commented(receipt) => {
                if let Some(photo) = self.photo.as_mut().filter(|p| p.id == receipt.photo_id) {
                    photo.comments.push(receipt.comment);
                }
                self.error = None;
                self.message = Some(receipt.message);
            }
            Action::Failed(error) => {
                self.loading = false;
                self.error = Some(error);
            }
            Action::ResetMessage => {
                self.error = None;
                self.message = None;
            }
        }
        self
    }
}

/// Drives a [`PhotoViewState`] with calls to the API
pub struct PhotoView<'a> {
    client: &'a ApiClient,
    state: PhotoViewState,
}

impl<'a> PhotoView<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            state: PhotoViewState::default(),
        }
    }

    pub fn state(&self) -> &PhotoViewState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        tracing::debug!("photo view: {:?}", action);
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    /// Load a photo; the state is `loading` until the request resolves
    pub async fn open(&mut self, id: &str) {
        self.dispatch(Action::FetchStarted);
        match self.client.photo(id).await {
            Ok(photo) => self.dispatch(Action::Fetched(photo)),
            Err(e) => self.dispatch(Action::Failed(e.to_string())),
        }
    }

    pub async fn like(&mut self) {
        let Some(id) = self.state.photo.as_ref().map(|p| p.id.to_string()) else {
            self.dispatch(Action::Failed("Foto não encontrada.".to_string()));
            return;
        };

        match self.client.like(&id).await {
            Ok(receipt) => self.dispatch(Action::Liked(receipt)),
            Err(e) => self.dispatch(Action::Failed(e.to_string())),
        }
    }

    pub async fn comment(&mut self, text: &str) {
        let Some(id) = self.state.photo.as_ref().map(|p| p.id.to_string()) else {
            self.dispatch(Action::Failed("Foto não encontrada.".to_string()));
            return;
        };

        match self.client.comment(&id, text).await {
            Ok(receipt) => self.dispatch(Action::Commented(receipt)),
            Err(e) => self.dispatch(Action::Failed(e.to_string())),
        }
    }

    pub fn reset_message(&mut self) {
        self.dispatch(Action::ResetMessage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photos::Comment;
    use crate::users::UserRecord;
    use uuid::Uuid;

    fn photo() -> Photo {
        let owner =
            UserRecord::new("Ana".to_string(), "ana@example.com".to_string(), "h".to_string())
                .profile();
        Photo::new(&owner, "Praia".to_string(), "praia.jpg".to_string())
    }

    #[test]
    fn test_fetch_lifecycle() {
        let state = PhotoViewState::default().reduce(Action::FetchStarted);
        assert!(state.loading);
        assert!(state.photo.is_none());

        let photo = photo();
        let state = state.reduce(Action::Fetched(photo.clone()));
        assert!(!state.loading);
        assert_eq!(state.photo, Some(photo));
    }

    #[test]
    fn test_failed_fetch_stops_loading() {
        let state = PhotoViewState::default()
            .reduce(Action::FetchStarted)
            .reduce(Action::Failed("Foto não encontrada.".to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Foto não encontrada."));
    }

    #[test]
    fn test_like_adds_user_once() {
        let photo = photo();
        let user_id = Uuid::new_v4();
        let receipt = LikeReceipt {
            photo_id: photo.id,
            user_id,
            message: "A foto foi curtida.".to_string(),
        };

        let state = PhotoViewState::default()
            .reduce(Action::Fetched(photo))
            .reduce(Action::Liked(receipt.clone()))
            .reduce(Action::Liked(receipt));

        assert_eq!(state.photo.unwrap().likes, vec![user_id]);
        assert_eq!(state.message.as_deref(), Some("A foto foi curtida."));
    }

    #[test]
    fn test_like_for_other_photo_is_ignored() {
        let receipt = LikeReceipt {
            photo_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            message: "A foto foi curtida.".to_string(),
        };
        let state = PhotoViewState::default()
            .reduce(Action::Fetched(photo()))
            .reduce(Action::Liked(receipt));
        assert!(state.photo.unwrap().likes.is_empty());
    }

    #[test]
    fn test_comment_for_other_photo_is_ignored() {
        let receipt = CommentReceipt {
            photo_id: Uuid::new_v4(),
            comment: Comment {
                comment: "Linda!".to_string(),
                user_name: "Bia".to_string(),
                user_image: None,
                user_id: Uuid::new_v4(),
            },
            message: "O comentário foi adicionado com sucesso!".to_string(),
        };
        let state = PhotoViewState::default()
            .reduce(Action::Fetched(photo()))
            .reduce(Action::Commented(receipt));
        assert!(state.photo.unwrap().comments.is_empty());
    }

    #[test]
    fn test_comment_appends_and_reset_clears_message() {
        let photo = photo();
        let photo_id = photo.id;
        let comment = Comment {
            comment: "Linda!".to_string(),
            user_name: "Bia".to_string(),
            user_image: None,
            user_id: Uuid::new_v4(),
        };

        let state = PhotoViewState::default()
            .reduce(Action::Fetched(photo))
            .reduce(Action::Commented(CommentReceipt {
                photo_id,
                comment: comment.clone(),
                message: "O comentário foi adicionado com sucesso!".to_string(),
            }));
        assert_eq!(state.photo.as_ref().unwrap().comments, vec![comment]);
        assert!(state.message.is_some());

        let state = state.reduce(Action::ResetMessage);
        assert!(state.message.is_none());
        assert!(state.error.is_none());
        assert!(state.photo.is_some());
    }
}
