//! Projtrack Core Integration Tests

use projtrack_core::{
    Error,
    intake,
    prelude::*,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_form_to_lists_workflow() {
    let ctx = AppContext::default();
    let lists = ctx.project_lists();
    let store = ctx.store();

    let snapshots = Rc::new(RefCell::new(Vec::new()));
    {
        let snapshots = Rc::clone(&snapshots);
        store.subscribe(move |projects| snapshots.borrow_mut().push(projects));
    }

    let form = Rc::new(RefCell::new(ctx.project_input()));
    let submit = ProjectInput::submit_handler(Rc::clone(&form), Rc::clone(&store));

    form.borrow_mut().fill("Build API", "Public REST surface", "3");
    submit().expect("first project should be accepted");

    form.borrow_mut().fill("Design UI", "Screens and flows", "2");
    submit().expect("second project should be accepted");

    let snapshots = snapshots.borrow();
    assert_eq!(snapshots.len(), 2);
    let titles: Vec<_> = snapshots[1].iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Build API", "Design UI"]);
    assert!(snapshots[1].iter().all(|p| p.status == ProjectStatus::Active));

    assert_eq!(lists[0].titles(), vec!["Build API", "Design UI"]);
    assert!(lists[1].titles().is_empty());
}

#[test]
fn test_rejected_submission_leaves_store_untouched() {
    let ctx = AppContext::default();
    let lists = ctx.project_lists();
    let mut form = ctx.project_input();

    form.fill("Build API", "Hi", "3");
    let rejection = form.submit(&ctx.store()).unwrap_err();

    assert_eq!(rejection.fields[0].field, "description");
    assert!(ctx.store().is_empty());
    assert_eq!(lists[0].redraw_count(), 0);

    let error: Error = rejection.into();
    assert!(matches!(error, Error::InvalidInput(_)));
}

#[test]
fn test_batch_intake_through_form() {
    let input = concat!(
        "{\"title\": \"Build API\", \"description\": \"Public REST surface\", \"people\": 3}\n",
        "{\"title\": \"\", \"description\": \"No title here\", \"people\": 2}\n",
        "{\"title\": \"Design UI\", \"description\": \"Screens and flows\", \"people\": \"6\"}\n",
        "{\"title\": \"Write docs\", \"description\": \"User guide\", \"people\": 1}\n",
    );
    let records = intake::read_records(input.as_bytes()).unwrap();

    let ctx = AppContext::default();
    let lists = ctx.project_lists();
    let store = ctx.store();
    let mut form = ctx.project_input();

    let mut rejected_lines = Vec::new();
    for record in &records {
        record.fill(&mut form);
        if form.submit(&store).is_err() {
            rejected_lines.push(record.line);
            form.clear();
        }
    }

    assert_eq!(rejected_lines, vec![2, 3]);
    assert_eq!(lists[0].titles(), vec!["Build API", "Write docs"]);
    assert_eq!(
        lists[0].render(),
        "ACTIVE PROJECTS\n  - Build API\n  - Write docs\n"
    );
}

#[test]
fn test_validation_scenarios() {
    assert!(!validate(&Validatable::new("Hi").required().min_length(5)));
    assert!(validate(&Validatable::new("Hello World").required().min_length(5)));
    assert!(!validate(&Validatable::new("Hello").required().min_length(5)));
    assert!(validate(&Validatable::new(3.0).min(1.0).max(5.0)));
    assert!(!validate(&Validatable::new(6.0).min(1.0).max(5.0)));
}
