#[cfg(test)]
mod tests {
    use crate::tests::init_db;
    use intervue::model::question::{Question, SubmitRequest};
    use intervue::model::subtag::Subtag;
    use std::collections::HashSet;

    fn submit(question: &str, category: &str, subtags: &str) -> SubmitRequest {
        SubmitRequest {
            question: question.to_string(),
            response: Some(format!("answer to {}", question)),
            category: category.to_string(),
            subtags: if subtags.is_empty() {
                None
            } else {
                Some(subtags.to_string())
            },
        }
    }

    #[tokio::test]
    async fn test_duplicate_subtags_within_one_submission() {
        let pool = init_db().await;

        Question::create(&pool, &submit("q1", "algo", "a, b, a"))
            .await
            .unwrap();

        assert_eq!(Subtag::get_count(&pool).await.unwrap(), 2);

        let questions = Question::recent(&pool, 10).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].subtags, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_subtag_reused_across_submissions() {
        let pool = init_db().await;

        Question::create(&pool, &submit("q1", "algo", "a"))
            .await
            .unwrap();
        Question::create(&pool, &submit("q2", "algo", "a"))
            .await
            .unwrap();

        assert_eq!(Subtag::get_count(&pool).await.unwrap(), 1);

        let subtag = Subtag::find_by_name(&pool, "a").await.unwrap().unwrap();
        let rows = Question::in_category_with_subtag(&pool, "algo", subtag.id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_subtag_names_are_trimmed() {
        let pool = init_db().await;

        Question::create(&pool, &submit("q1", "algo", " graphs ,  bfs "))
            .await
            .unwrap();

        assert!(Subtag::find_by_name(&pool, "graphs").await.unwrap().is_some());
        assert!(Subtag::find_by_name(&pool, "bfs").await.unwrap().is_some());
        assert!(Subtag::find_by_name(&pool, " graphs ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_limits_and_orders_newest_first() {
        let pool = init_db().await;

        for i in 0..12 {
            Question::create(&pool, &submit(&format!("q{}", i), "algo", ""))
                .await
                .unwrap();
        }

        let questions = Question::recent(&pool, 10).await.unwrap();
        assert_eq!(questions.len(), 10);

        // Creation timestamps can collide at millisecond resolution; the
        // id tie-break keeps the order strict regardless.
        for pair in questions.windows(2) {
            assert!(pair[0].row.created_at >= pair[1].row.created_at);
            assert!(pair[0].row.id > pair[1].row.id);
        }
        assert_eq!(questions[0].row.question_text, "q11");
    }

    #[tokio::test]
    async fn test_recent_on_empty_store() {
        let pool = init_db().await;
        assert!(Question::recent(&pool, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subtags_for_category_round_trip() {
        let pool = init_db().await;

        Question::create(&pool, &submit("q1", "system design", "x,y"))
            .await
            .unwrap();

        let names: HashSet<String> = Subtag::in_category(&pool, "system design")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, HashSet::from(["x".to_string(), "y".to_string()]));
    }

    #[tokio::test]
    async fn test_subtags_do_not_leak_across_categories() {
        let pool = init_db().await;

        Question::create(&pool, &submit("q1", "algo", "shared, algo-only"))
            .await
            .unwrap();
        Question::create(&pool, &submit("q2", "behavioral", "shared"))
            .await
            .unwrap();

        let names: Vec<String> = Subtag::in_category(&pool, "behavioral")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["shared"]);
    }

    #[tokio::test]
    async fn test_categories_are_distinct_and_sorted() {
        let pool = init_db().await;

        Question::create(&pool, &submit("q1", "b", "")).await.unwrap();
        Question::create(&pool, &submit("q2", "a", "")).await.unwrap();
        Question::create(&pool, &submit("q3", "b", "")).await.unwrap();

        let categories = Question::categories(&pool).await.unwrap();
        assert_eq!(categories, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_create_without_subtags() {
        let pool = init_db().await;

        let res = Question::create(&pool, &submit("q1", "algo", ""))
            .await
            .unwrap();
        assert!(res.id > 0);

        assert_eq!(Subtag::get_count(&pool).await.unwrap(), 0);
        assert_eq!(Question::get_count(&pool).await.unwrap(), 1);

        let questions = Question::recent(&pool, 10).await.unwrap();
        assert!(questions[0].subtags.is_empty());
    }

    #[tokio::test]
    async fn test_overlong_subtag_name_is_rejected() {
        let pool = init_db().await;

        let result = Question::create(&pool, &submit("q1", "algo", &"x".repeat(101))).await;
        assert!(result.is_err());

        // The rejected submission must not leave a question behind.
        assert_eq!(Question::get_count(&pool).await.unwrap(), 0);
    }
}
