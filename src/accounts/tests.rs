use time::OffsetDateTime;

use crate::accounts::models::{ProfileUpdate, USERS_EMAIL_KEY, USERS_USERNAME_KEY};
use crate::accounts::repo::AccountsRepo;
use crate::error::RepoError;
use crate::factories::{InviteEmailFactory, ProfileFactory, UserFactory};
use crate::memory::MemoryStore;

mod user {
    use super::*;

    #[test]
    fn factory() {
        let user = UserFactory::new().build();
        assert_ne!(user.username, "");
        assert_ne!(user.email, "");
        assert!(!user.has_usable_password());
    }

    #[tokio::test]
    async fn unique_email() {
        let store = MemoryStore::default();
        UserFactory::new()
            .email("matt@test.com")
            .create(&store)
            .await
            .expect("first user is created");

        let err = UserFactory::new()
            .email("matt@test.com")
            .create(&store)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Integrity { .. }));
        assert_eq!(err.constraint(), Some(USERS_EMAIL_KEY));
    }

    #[tokio::test]
    async fn unique_username() {
        let store = MemoryStore::default();
        UserFactory::new().username("matt").create(&store).await.unwrap();
        let err = UserFactory::new()
            .username("matt")
            .create(&store)
            .await
            .unwrap_err();
        assert_eq!(err.constraint(), Some(USERS_USERNAME_KEY));
    }

    #[tokio::test]
    async fn rejected_user_is_not_stored() {
        let store = MemoryStore::default();
        let (first, _) = UserFactory::new()
            .email("matt@test.com")
            .create(&store)
            .await
            .unwrap();
        let second = UserFactory::new().email("matt@test.com").build();
        assert!(store.insert_user(&second).await.is_err());

        let found = store.find_user_by_email("matt@test.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(first.id));
        assert!(store.find_user_by_id(second.id).await.unwrap().is_none());
        assert!(matches!(
            store.find_profile(second.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn has_profile() {
        let store = MemoryStore::default();
        let (user, profile) = UserFactory::new().create(&store).await.unwrap();
        assert_eq!(profile.user_id, user.id);

        let stored = store.find_profile(user.id).await.expect("profile exists");
        assert_eq!(stored, profile);
    }
}

mod invite_email {
    use super::*;

    #[test]
    fn factory() {
        let invite = InviteEmailFactory::new().build();
        assert_ne!(invite.email, "");
    }

    #[tokio::test]
    async fn created_date() {
        let store = MemoryStore::default();
        let invite = InviteEmailFactory::new().create(&store).await.unwrap();
        assert_eq!(OffsetDateTime::now_utc().date(), invite.created_date.date());
    }

    #[tokio::test]
    async fn listed_newest_first() {
        let store = MemoryStore::default();
        let mut older = InviteEmailFactory::new().email("old@test.com").build();
        older.created_date -= time::Duration::hours(1);
        store.insert_invite_email(&older).await.unwrap();
        let newer = InviteEmailFactory::new()
            .email("new@test.com")
            .create(&store)
            .await
            .unwrap();

        let emails: Vec<String> = store
            .list_invite_emails()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.email)
            .collect();
        assert_eq!(emails, vec![newer.email, older.email]);
    }
}

mod profile {
    use super::*;

    #[test]
    fn factory() {
        let profile = ProfileFactory::new().build();
        assert!(!profile.user_id.is_nil());
        assert_eq!("", profile.postal_code);
        assert_eq!("", profile.stripe_customer_id);
    }

    #[test]
    fn belongs_to_given_user() {
        let user = UserFactory::new().build();
        let profile = ProfileFactory::new().user_id(user.id).build();
        assert_eq!(profile.user_id, user.id);
    }

    #[test]
    fn has_postal_code() {
        let profile = ProfileFactory::new().postal_code("21702").build();
        assert_eq!("21702", profile.postal_code);
    }

    #[test]
    fn has_stripe_customer_id() {
        let profile = ProfileFactory::new().stripe_customer_id("cus_1234").build();
        assert_eq!("cus_1234", profile.stripe_customer_id);
    }

    #[tokio::test]
    async fn update_is_persisted() {
        let store = MemoryStore::default();
        let (user, _) = UserFactory::new().create(&store).await.unwrap();
        let updated = store
            .update_profile(
                user.id,
                ProfileUpdate {
                    postal_code: None,
                    stripe_customer_id: Some("cus_1234".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.stripe_customer_id, "cus_1234");
        assert_eq!(updated.postal_code, "");
        assert_eq!(store.find_profile(user.id).await.unwrap(), updated);
    }
}
