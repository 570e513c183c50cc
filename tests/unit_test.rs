// Unit tests for usercore
// These exercise the public API: store transitions, filtering, ids and form validation.

#[cfg(test)]
mod store_tests {
    use usercore::model::{Company, NewUser, User};
    use usercore::store::{Action, Status, Store, UserState, reduce};

    fn leanne() -> User {
        User {
            id: 1,
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            company: Company {
                name: "Romaguera-Crona".to_string(),
                catch_phrase: "Multi-layered client-server neural-net".to_string(),
            },
            ..Default::default()
        }
    }

    fn mk_user(id: u64, name: &str, email: &str, company: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: name.to_lowercase().replace(' ', ""),
            email: email.to_string(),
            company: Company { name: company.to_string(), ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn test_search_scenario_from_loaded_record() {
        let mut store = Store::new();
        store.load(vec![leanne()]);

        store.set_search_term("leanne");
        let view = store.filtered_view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, 1);

        store.set_search_term("zzz");
        assert!(store.filtered_view().is_empty());
    }

    #[test]
    fn test_filtered_view_matches_exact_subset() {
        let mut store = Store::new();
        store.load(vec![
            mk_user(1, "Leanne Graham", "Sincere@april.biz", "Romaguera-Crona"),
            mk_user(2, "Ervin Howell", "Shanna@melissa.tv", "Deckow-Crist"),
            mk_user(3, "Patricia Lebsack", "Julianne.OConner@kory.org", "Robel-Corkery"),
        ]);
        for term in ["", "a", "ORG", "crist", "lebsack", "@", "nothing-here"] {
            store.set_search_term(term);
            let needle = term.to_lowercase();
            let expected: Vec<u64> = store
                .users()
                .iter()
                .filter(|u| {
                    u.name.to_lowercase().contains(&needle)
                        || u.email.to_lowercase().contains(&needle)
                        || u.company.name.to_lowercase().contains(&needle)
                })
                .map(|u| u.id)
                .collect();
            let got: Vec<u64> = store.filtered_view().iter().map(|u| u.id).collect();
            assert_eq!(got, expected, "term {term:?}");
        }
    }

    #[test]
    fn test_add_prepends_and_grows_by_one() {
        let mut store = Store::new();
        store.load(vec![leanne(), mk_user(2, "Ervin Howell", "Shanna@melissa.tv", "Deckow-Crist")]);
        let before = store.users().len();
        let id = store.add(NewUser {
            name: "A".to_string(),
            username: "a".to_string(),
            email: "a@a.com".to_string(),
            ..Default::default()
        });
        assert_eq!(store.users().len(), before + 1);
        assert_eq!(store.users()[0].id, id);
        assert_eq!(store.users()[0].name, "A");
        assert_eq!(store.users().iter().filter(|u| u.id == id).count(), 1);
    }

    #[test]
    fn test_rapid_adds_never_collide() {
        let mut store = Store::new();
        store.load(vec![]);
        let ids: Vec<u64> = (0..50)
            .map(|i| store.add(NewUser { name: format!("n{i}"), ..Default::default() }))
            .collect();
        let mut dedup = ids.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), ids.len());
    }

    #[test]
    fn test_update_changes_only_target() {
        let mut store = Store::new();
        let others = vec![
            mk_user(1, "A", "a@a.io", "X"),
            mk_user(2, "B", "b@b.io", "Y"),
            mk_user(3, "C", "c@c.io", "Z"),
        ];
        store.load(others.clone());
        let mut changed = others[1].clone();
        changed.email = "new@b.io".to_string();
        store.update(changed.clone());
        assert_eq!(store.users(), &[others[0].clone(), changed, others[2].clone()]);

        let snapshot = store.state().clone();
        store.update(mk_user(42, "Ghost", "g@g.io", "G"));
        assert_eq!(store.state(), &snapshot);
    }

    #[test]
    fn test_delete_twice_is_noop_second_time() {
        let mut store = Store::new();
        store.load(vec![mk_user(1, "A", "a@a.io", "X"), mk_user(2, "B", "b@b.io", "Y")]);
        store.delete(2);
        let after_first = store.state().clone();
        store.delete(2);
        assert_eq!(store.state(), &after_first);
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_load_twice_yields_same_state() {
        let records = vec![leanne(), mk_user(2, "B", "b@b.io", "Y")];
        let mut a = Store::new();
        a.load(records.clone());
        let once = a.state().clone();
        a.load(records);
        assert_eq!(a.state(), &once);
    }

    #[test]
    fn test_failed_load_leaves_users_unchanged() {
        let mut store = Store::new();
        store.load(vec![leanne()]);
        let users_before = store.users().to_vec();
        store.set_loading(true);
        store.set_error(Some("Failed to fetch users".to_string()));
        assert_eq!(store.error(), Some("Failed to fetch users"));
        assert!(!store.is_loading());
        assert_eq!(store.users(), users_before.as_slice());
        assert_eq!(store.status(), Status::Error);
    }

    #[test]
    fn test_status_transitions() {
        let mut store = Store::new();
        assert_eq!(store.status(), Status::Loading);
        store.set_error(Some("down".to_string()));
        assert_eq!(store.status(), Status::Error);
        store.set_loading(true);
        assert_eq!(store.status(), Status::Loading);
        store.load(vec![leanne()]);
        assert_eq!(store.status(), Status::Ready);
        store.set_search_term("x");
        store.delete(1);
        assert_eq!(store.status(), Status::Ready);
    }

    #[test]
    fn test_reduce_is_pure_over_input() {
        let state = UserState::default();
        let next = reduce(state.clone(), Action::SetSearchTerm("abc".to_string()));
        assert_eq!(state.search_term, "");
        assert_eq!(next.search_term, "abc");
        assert_eq!(next.users, state.users);
    }
}

#[cfg(test)]
mod form_tests {
    use usercore::form::{FormField, FormMode, UserForm, is_valid_email};
    use usercore::model::User;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@a.com"));
        assert!(is_valid_email("Sincere@april.biz"));
        assert!(!is_valid_email("a@a"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@."));
    }

    #[test]
    fn test_add_form_to_new_user() {
        let mut form = UserForm::add();
        form.draft.name = "Ann".to_string();
        form.draft.username = "ann".to_string();
        form.draft.email = "ann@example.org".to_string();
        form.draft.company = "Acme".to_string();
        form.draft.city = "Springfield".to_string();
        assert!(form.validate());
        let new = form.to_new_user();
        assert_eq!(new.company.name, "Acme");
        assert_eq!(new.address.city, "Springfield");
    }

    #[test]
    fn test_titles_by_mode() {
        let user = User { id: 1, ..Default::default() };
        assert_eq!(UserForm::add().title(), "Add New User");
        assert_eq!(UserForm::edit(&user).title(), "Edit User");
        assert_eq!(UserForm::view(&user).title(), "User Details");
        assert_eq!(UserForm::view(&user).mode, FormMode::View);
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<FormField> = FormField::ALL.into_iter().filter(|f| f.required()).collect();
        assert_eq!(required, vec![FormField::Name, FormField::Username, FormField::Email]);
    }
}
