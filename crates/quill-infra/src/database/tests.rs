#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Schema, Transaction};

    use crate::database::entity::{post, todo};
    use crate::database::postgres_repo::PostgresPostRepository;
    use quill_core::domain::{NewPost, Post};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository};

    /// Statements the repository sent to its mock connection.
    fn transaction_log(repo: PostgresPostRepository) -> Vec<Transaction> {
        Arc::into_inner(repo.db)
            .expect("repository is the only owner of the mock connection")
            .into_transaction_log()
    }

    fn post_model(id: i32, title: &str, age_minutes: i64) -> post::Model {
        let at = Utc::now() - Duration::minutes(age_minutes);
        post::Model {
            id,
            title: title.to_owned(),
            content: "Content".to_owned(),
            author_id: None,
            author_name: None,
            created_at: at.into(),
            updated_at: at.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, "Test Post", 0)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 7);
    }

    #[tokio::test]
    async fn test_find_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(404).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at_desc() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                post_model(2, "Newer", 1),
                post_model(1, "Older", 10),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.list_newest_first().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Newer");

        let log = transaction_log(repo);
        let sql = &log[0].statements()[0].sql;
        assert!(
            sql.contains(r#"ORDER BY "posts"."created_at" DESC, "posts"."id" DESC"#),
            "unexpected query: {sql}"
        );
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let stored = post_model(3, "Hello", 0);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo
            .insert(NewPost {
                title: "Hello".to_owned(),
                content: "Content".to_owned(),
                author_id: None,
                author_name: None,
            })
            .await
            .unwrap();

        assert_eq!(post, Post::from(stored));

        let log = transaction_log(repo);
        let sql = &log[0].statements()[0].sql;
        assert!(sql.starts_with(r#"INSERT INTO "posts""#), "unexpected query: {sql}");
        assert!(sql.contains("RETURNING"), "unexpected query: {sql}");

        let columns = sql.split("VALUES").next().unwrap();
        assert!(!columns.contains("created_at"));
        assert!(!columns.contains(r#""id""#));
    }

    #[tokio::test]
    async fn test_query_failure_maps_to_repo_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("relation \"posts\" does not exist".into())])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let err = repo.list_newest_first().await.unwrap_err();
        assert!(matches!(err, RepoError::Query(_)));
    }

    #[test]
    fn test_schema_declares_both_tables() {
        let schema = Schema::new(DatabaseBackend::Postgres);
        let posts = DatabaseBackend::Postgres
            .build(&schema.create_table_from_entity(post::Entity))
            .to_string();
        let todos = DatabaseBackend::Postgres
            .build(&schema.create_table_from_entity(todo::Entity))
            .to_string();

        assert!(posts.contains(r#"CREATE TABLE "posts""#));
        assert!(posts.contains("varchar(255)"));
        assert!(todos.contains(r#"CREATE TABLE "todos""#));
    }
}
