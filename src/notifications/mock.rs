use mockall::mock;

use super::{NotificationError, NotificationSender};

mock! {
    pub NotificationSender {}

    impl NotificationSender for NotificationSender {
        fn send(&self, phone: &str, body: &str) -> Result<(), NotificationError>;
    }
}
