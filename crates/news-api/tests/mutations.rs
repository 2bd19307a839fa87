mod common;

use common::{data, error, TestApi};
use serde_json::json;
use news_core::NewsStore;

const CREATE_POST: &str =
    "mutation($title: String!) { createPost(post: { title: $title }) { title votes author { name } } }";
const DELETE_POST: &str = "mutation($id: ID!) { deletePost(id: $id) { id title author { name posts { title } } } }";
const UPVOTE: &str = "mutation($id: ID!) { upvotePost(id: $id) { title votes myVote } }";
const DOWNVOTE: &str = "mutation($id: ID!) { downvotePost(id: $id) { title votes myVote } }";
const UNVOTE: &str = "mutation($id: ID!) { unvotePost(id: $id) { votes myVote } }";
const SIGNUP: &str =
    "mutation($name: String!, $email: String!, $password: String!) { signup(name: $name, email: $email, password: $password) }";
const LOGIN: &str = "mutation($email: String!, $password: String!) { login(email: $email, password: $password) }";

mod create_post {
    use super::*;

    #[tokio::test]
    async fn unauthenticated_is_rejected_without_store_call() {
        let api = TestApi::new();
        let response = api.anonymous(CREATE_POST, json!({ "title": "A nice test title" })).await;
        assert_eq!(error(&response).0, "Not authorised!");
        assert!(api.store.calls_to("create_post").is_empty());
    }

    #[tokio::test]
    async fn author_is_taken_from_session() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;

        let response = api
            .as_user(&jonas, CREATE_POST, json!({ "title": "A nice test title" }))
            .await;
        assert_eq!(
            data(&response),
            json!({ "createPost": { "title": "A nice test title", "votes": 0, "author": { "name": "Jonas" } } })
        );
        assert_eq!(
            api.store.calls_to("create_post"),
            vec![format!("create_post(A nice test title, {jonas})")]
        );
    }

    #[tokio::test]
    async fn posts_accumulate() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        for title in ["first", "second"] {
            api.as_user(&jonas, CREATE_POST, json!({ "title": title })).await;
        }
        let response = api.anonymous("{ posts { title } }", json!({})).await;
        assert_eq!(
            data(&response),
            json!({ "posts": [{ "title": "first" }, { "title": "second" }] })
        );
    }

    #[tokio::test]
    async fn blank_title_is_bad_input() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let response = api.as_user(&jonas, CREATE_POST, json!({ "title": "   " })).await;
        assert_eq!(error(&response).1.as_deref(), Some("BAD_USER_INPUT"));
    }
}

mod delete_post {
    use super::*;

    #[tokio::test]
    async fn unauthenticated_is_rejected_without_store_call() {
        let api = TestApi::new();
        let response = api.anonymous(DELETE_POST, json!({ "id": "0" })).await;
        assert_eq!(error(&response).0, "Not authorised!");
        assert!(api.store.calls_to("delete_post").is_empty());
    }

    #[tokio::test]
    async fn missing_post() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let response = api.as_user(&jonas, DELETE_POST, json!({ "id": "0" })).await;
        assert_eq!(
            error(&response),
            ("No post found for ID 0!".to_string(), Some("NOT_FOUND".to_string()))
        );
    }

    #[tokio::test]
    async fn other_users_post_is_forbidden() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let michelle = api.user("Michelle", "m@m.de", "otherPassword").await;
        let post = api.post("Mine", &michelle).await;

        let response = api.as_user(&jonas, DELETE_POST, json!({ "id": post })).await;
        assert_eq!(
            error(&response),
            (
                "Deleting other users' posts is forbidden!".to_string(),
                Some("FORBIDDEN".to_string())
            )
        );
        assert!(api.store.calls_to("delete_post").is_empty());
    }

    #[tokio::test]
    async fn own_post_is_deleted() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let post = api.post("Hello world", &jonas).await;

        let response = api.as_user(&jonas, DELETE_POST, json!({ "id": post })).await;
        assert_eq!(
            data(&response),
            json!({
                "deletePost": { "id": post, "title": "Hello world", "author": { "name": "Jonas", "posts": [] } }
            })
        );
        assert_eq!(api.store.calls_to("delete_post"), vec![format!("delete_post({post})")]);

        let again = api.as_user(&jonas, DELETE_POST, json!({ "id": post })).await;
        assert_eq!(error(&again).0, format!("No post found for ID {post}!"));
    }

    #[tokio::test]
    async fn deleted_snapshot_reports_no_vote() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let post = api.post("Hello world", &jonas).await;
        news_core::vote::upvote(api.store.as_ref(), &post, &jonas).await.unwrap();

        let response = api
            .as_user(
                &jonas,
                "mutation($id: ID!) { deletePost(id: $id) { id votes myVote } }",
                json!({ "id": post }),
            )
            .await;
        assert_eq!(
            data(&response),
            json!({ "deletePost": { "id": post, "votes": 1, "myVote": 0 } })
        );
    }
}

mod voting {
    use super::*;

    async fn votes(api: &TestApi, user: &str, mutation: &str, post: &str) -> serde_json::Value {
        let response = api.as_user(user, mutation, json!({ "id": post })).await;
        data(&response)
    }

    #[tokio::test]
    async fn unauthenticated_is_rejected_without_store_call() {
        let api = TestApi::new();
        for mutation in [UPVOTE, DOWNVOTE, UNVOTE] {
            let response = api.anonymous(mutation, json!({ "id": "1234" })).await;
            assert_eq!(error(&response).0, "Not authorised!");
        }
        assert!(api.store.calls_to("set_vote").is_empty());
    }

    #[tokio::test]
    async fn missing_post() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        for mutation in [UPVOTE, DOWNVOTE] {
            let response = api.as_user(&jonas, mutation, json!({ "id": "0" })).await;
            assert_eq!(error(&response).0, "No post found for ID 0!");
        }
    }

    #[tokio::test]
    async fn upvote_counts() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let michelle = api.user("Michelle", "m@m.de", "otherPassword").await;
        let first = api.post("first", &jonas).await;
        let second = api.post("second", &jonas).await;

        let up = |votes: i64| json!({ "upvotePost": { "title": "first", "votes": votes, "myVote": 1 } });
        assert_eq!(votes(&api, &jonas, UPVOTE, &first).await, up(1));
        assert_eq!(votes(&api, &jonas, UPVOTE, &first).await, up(1));
        assert_eq!(votes(&api, &michelle, UPVOTE, &first).await, up(2));

        news_core::vote::downvote(api.store.as_ref(), &second, &jonas).await.unwrap();
        assert_eq!(
            votes(&api, &jonas, UPVOTE, &second).await,
            json!({ "upvotePost": { "title": "second", "votes": 1, "myVote": 1 } })
        );
        assert_eq!(
            api.store.calls_to("set_vote").first().cloned(),
            Some(format!("set_vote({first}, {jonas}, up)"))
        );
    }

    #[tokio::test]
    async fn downvote_counts() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let michelle = api.user("Michelle", "m@m.de", "otherPassword").await;
        let first = api.post("first", &jonas).await;
        let second = api.post("second", &jonas).await;

        let down =
            |votes: i64| json!({ "downvotePost": { "title": "first", "votes": votes, "myVote": -1 } });
        assert_eq!(votes(&api, &jonas, DOWNVOTE, &first).await, down(-1));
        assert_eq!(votes(&api, &jonas, DOWNVOTE, &first).await, down(-1));
        assert_eq!(votes(&api, &michelle, DOWNVOTE, &first).await, down(-2));

        news_core::vote::upvote(api.store.as_ref(), &second, &jonas).await.unwrap();
        assert_eq!(
            votes(&api, &jonas, DOWNVOTE, &second).await,
            json!({ "downvotePost": { "title": "second", "votes": -1, "myVote": -1 } })
        );
    }

    #[tokio::test]
    async fn unvote_withdraws() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let post = api.post("first", &jonas).await;

        votes(&api, &jonas, UPVOTE, &post).await;
        assert_eq!(
            votes(&api, &jonas, UNVOTE, &post).await,
            json!({ "unvotePost": { "votes": 0, "myVote": 0 } })
        );
        assert_eq!(
            votes(&api, &jonas, UNVOTE, &post).await,
            json!({ "unvotePost": { "votes": 0, "myVote": 0 } })
        );
    }
}

mod signup {
    use super::*;

    fn vars(password: &str) -> serde_json::Value {
        json!({ "name": "TestUser", "email": "t@t.de", "password": password })
    }

    #[tokio::test]
    async fn short_password_rejected() {
        let api = TestApi::new();
        let response = api.anonymous(SIGNUP, vars("short")).await;
        assert_eq!(
            error(&response),
            (
                "Password must be at least 8 characters long!".to_string(),
                Some("BAD_USER_INPUT".to_string())
            )
        );
        assert!(api.store.calls_to("create_user").is_empty());
    }

    #[tokio::test]
    async fn returns_token_for_new_user() {
        let api = TestApi::new();
        let response = api.anonymous(SIGNUP, vars("someLongEnoughPassword")).await;
        let token = data(&response)["signup"].as_str().unwrap().to_string();

        let claims = api.auth.verify_token(&token).unwrap();
        let user = api.store.get_user(&claims.user_id).await.unwrap();
        assert_eq!(user.name, "TestUser");
        assert_ne!(user.password_hash, "someLongEnoughPassword");
        assert_eq!(api.store.calls_to("create_user"), vec!["create_user(TestUser, t@t.de)"]);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let api = TestApi::new();
        data(&api.anonymous(SIGNUP, vars("someLongEnoughPassword")).await);
        let response = api.anonymous(SIGNUP, vars("someLongEnoughPassword")).await;
        assert_eq!(error(&response).0, "User with email t@t.de already exists!");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn unknown_email() {
        let api = TestApi::new();
        let response = api
            .anonymous(LOGIN, json!({ "email": "t@t.de", "password": "somePassword" }))
            .await;
        assert_eq!(error(&response).0, "No user with email t@t.de found!");
    }

    #[tokio::test]
    async fn wrong_password() {
        let api = TestApi::new();
        api.user("Jonas", "j@j.de", "somePassword").await;
        let response = api
            .anonymous(LOGIN, json!({ "email": "j@j.de", "password": "wrongPassword" }))
            .await;
        assert_eq!(error(&response).0, "Invalid password!");
    }

    #[tokio::test]
    async fn returns_token() {
        let api = TestApi::new();
        let jonas = api.user("Jonas", "j@j.de", "somePassword").await;
        let response = api
            .anonymous(LOGIN, json!({ "email": "j@j.de", "password": "somePassword" }))
            .await;
        let token = data(&response)["login"].as_str().unwrap().to_string();
        assert_eq!(api.auth.verify_token(&token).unwrap().user_id, jonas);
    }
}
