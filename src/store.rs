use crate::errors::{NeuralError, NeuralResult};
use crate::models::Message;
use uuid::Uuid;

/// Ordered, append-only transcript. The only non-append mutation is swapping
/// the trailing placeholder for its resolved message.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Message) -> Self {
        Self {
            messages: vec![seed],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn has_placeholder(&self) -> bool {
        self.messages.iter().any(|m| m.is_loading)
    }

    /// Appends a resolved message. Placeholders go through `push_placeholder`.
    pub fn push(&mut self, message: Message) -> NeuralResult<()> {
        if message.is_loading {
            return Err(NeuralError::store_error(
                "loading messages must be appended with push_placeholder",
            ));
        }
        self.messages.push(message);
        Ok(())
    }

    /// Appends an empty loading message and returns its id.
    pub fn push_placeholder(&mut self) -> NeuralResult<Uuid> {
        if self.has_placeholder() {
            return Err(NeuralError::store_error("a placeholder is already pending"));
        }
        let placeholder = Message::placeholder();
        let id = placeholder.id;
        self.messages.push(placeholder);
        Ok(id)
    }

    /// Removes the trailing placeholder `id` and appends `resolved` in its place.
    pub fn replace_placeholder(&mut self, id: Uuid, resolved: Message) -> NeuralResult<()> {
        if resolved.is_loading {
            return Err(NeuralError::store_error("replacement must not be loading"));
        }
        match self.messages.last() {
            Some(last) if last.id == id && last.is_loading => {
                self.messages.pop();
                self.messages.push(resolved);
                Ok(())
            }
            _ => Err(NeuralError::store_error(format!(
                "placeholder {} is not the last message",
                id
            ))),
        }
    }

    /// Drops the loading message `id` wherever it sits. Returns whether one was removed.
    pub fn discard_placeholder(&mut self, id: Uuid) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !(m.id == id && m.is_loading));
        self.messages.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut store = MessageStore::new();
        store.push(Message::user("one")).unwrap();
        store.push(Message::assistant("two")).unwrap();
        store.push(Message::user("three")).unwrap();

        let contents: Vec<&str> = store.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[test]
    fn test_only_one_placeholder() {
        let mut store = MessageStore::new();
        store.push_placeholder().unwrap();
        assert!(store.push_placeholder().is_err());
        assert_eq!(store.messages().iter().filter(|m| m.is_loading).count(), 1);
    }

    #[test]
    fn test_push_rejects_loading_message() {
        let mut store = MessageStore::new();
        assert!(store.push(Message::placeholder()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_placeholder_swaps_last() {
        let mut store = MessageStore::with_seed(Message::assistant("seed"));
        store.push(Message::user("hi")).unwrap();
        let id = store.push_placeholder().unwrap();

        store.replace_placeholder(id, Message::assistant("done")).unwrap();

        assert_eq!(store.len(), 3);
        assert!(!store.has_placeholder());
        assert_eq!(store.last().unwrap().content, "done");
    }

    #[test]
    fn test_replace_requires_trailing_placeholder() {
        let mut store = MessageStore::new();
        let id = store.push_placeholder().unwrap();
        store.messages.push(Message::user("late"));

        assert!(store.replace_placeholder(id, Message::assistant("x")).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut store = MessageStore::new();
        store.push_placeholder().unwrap();
        assert!(store
            .replace_placeholder(Uuid::new_v4(), Message::assistant("x"))
            .is_err());
        assert!(store.has_placeholder());
    }

    #[test]
    fn test_discard_placeholder_not_at_end() {
        let mut store = MessageStore::new();
        let id = store.push_placeholder().unwrap();
        store.push(Message::assistant("interleaved")).unwrap();

        assert!(store.discard_placeholder(id));
        assert!(!store.has_placeholder());
        assert_eq!(store.len(), 1);
        assert!(!store.discard_placeholder(id));
    }
}
