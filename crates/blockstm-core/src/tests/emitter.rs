use super::{HEADER, document, initial_to, render};
use crate::*;

#[test]
fn renders_initial_state_declarations_and_labelled_transition() {
    let items = vec![
        initial_to("A"),
        StateItem::new("A").with_transition(
            Transition::to(naming::FINAL_STATE)
                .with_event("e")
                .with_guard("g")
                .with_effect("f"),
        ),
    ];
    assert_eq!(
        render(&items),
        document("state A\n[*] --> A\nA --> [*] :e [g] / f\n")
    );
}

#[test]
fn missing_initial_state_yields_only_its_notice() {
    let items = vec![StateItem::new("A").with_transition(Transition::to("B"))];
    assert_eq!(
        render(&items),
        document(Notice::MissingInitialState.note_block())
    );

    let detached = vec![
        StateItem::new(naming::INITIAL_STATE)
            .with_myself(false)
            .with_transition(Transition::to("A")),
        StateItem::new("A"),
    ];
    assert_eq!(
        render(&detached),
        document(Notice::MissingInitialState.note_block())
    );
}

#[test]
fn naming_notice_is_checked_after_initial_notice() {
    let no_initial = vec![StateItem::new("bad name")];
    assert_eq!(
        render(&no_initial),
        document(Notice::MissingInitialState.note_block())
    );

    let items = vec![
        initial_to("A"),
        StateItem::new("A").with_transition(Transition::to("bad name")),
    ];
    assert_eq!(
        render(&items),
        document(Notice::InvalidStateName.note_block())
    );
}

#[test]
fn multiple_initial_transitions_yield_their_notice() {
    let initial = initial_to("A").with_transition(Transition::to("B"));
    let items = vec![initial, StateItem::new("A"), StateItem::new("B")];
    assert_eq!(
        render(&items),
        document(Notice::MultipleInitialTransitions.note_block())
    );
}

#[test]
fn duplicate_flag_yields_its_notice() {
    let items = vec![
        initial_to("A"),
        StateItem::new("A"),
        StateItem::new("A").with_invalid("true"),
    ];
    assert_eq!(
        render(&items),
        document(Notice::DuplicateState.note_block())
    );
}

#[test]
fn initial_without_target_yields_fifth_notice() {
    let items = vec![
        StateItem::new(naming::INITIAL_STATE).with_myself(true),
        StateItem::new("A").with_transition(Transition::to("B")),
    ];
    assert_eq!(
        render(&items),
        document(Notice::NoTransitionFromInitial.note_block())
    );
}

#[test]
fn error_notice_text_is_exact() {
    let text = render(&[]);
    assert_eq!(
        text,
        "@startuml\nskinparam defaultFontName \"Noto Sans JP\"\nnote as InitialStateDefinitionError\n <b><color:red>\"初めは「初期状態」としてください\"\n end note\n@enduml"
    );
}

#[test]
fn undefined_placeholders_are_declared_in_red() {
    let items = vec![initial_to("未定義1")];
    assert_eq!(
        render(&items),
        document("state 未定義1#text:red\n[*] --> 未定義1\n")
    );
}

#[test]
fn initial_to_final_declares_nothing() {
    let items = vec![initial_to(naming::FINAL_STATE)];
    assert_eq!(render(&items), document("[*] --> [*]\n"));
}

#[test]
fn initial_effect_and_forbidden_event_guard() {
    let initial = StateItem::new(naming::INITIAL_STATE)
        .with_myself(true)
        .with_transition(
            Transition::to("A")
                .with_event("go")
                .with_guard("ok")
                .with_effect("boot"),
        );
    let expected = concat!(
        "state A\n",
        "[*] --> A : / boot\n",
        "note on link #FFF8DC\n",
        " 'InitialStateEventError\n",
        " <b><color:red> 「初期状態」には「イベント」を設定できません\n",
        " 'InitialStateConditionError\n",
        " <b><color:red> 「初期状態」には「条件」を設定できません\n",
        "end note\n",
    );
    assert_eq!(render(&[initial]), document(expected));
}

#[test]
fn initial_guard_alone_gets_only_the_condition_note() {
    let initial = StateItem::new(naming::INITIAL_STATE)
        .with_myself(true)
        .with_transition(Transition::to("A").with_guard("ok"));
    let text = render(&[initial]);
    assert!(text.contains("[*] --> A\nnote on link #FFF8DC\n 'InitialStateConditionError\n"));
    assert!(!text.contains("InitialStateEventError"));
}

#[test]
fn label_parts_are_assembled_from_what_is_present() {
    let items = vec![
        initial_to("A"),
        StateItem::new("A")
            .with_transition(Transition::to("B").with_event("completeEvent"))
            .with_transition(Transition::to("C").with_guard("g"))
            .with_transition(Transition::to("D").with_effect("f"))
            .with_transition(Transition::to("E").with_event("e"))
            .with_transition(Transition::default().with_event("dropped")),
    ];
    let expected = concat!(
        "state A\nstate B\nstate C\nstate D\nstate E\n",
        "[*] --> A\n",
        "A --> B\n",
        "A --> C : [g]\n",
        "A --> D : / f\n",
        "A --> E :e\n",
    );
    assert_eq!(render(&items), document(expected));
}

#[test]
fn behaviors_render_in_entry_do_exit_order() {
    let items = vec![
        initial_to("A"),
        StateItem::new("A").with_behavior(Behavior {
            exit: Some("close".to_string()),
            entry: Some("open".to_string()),
            do_activity: Some("read".to_string()),
        }),
    ];
    assert_eq!(
        render(&items),
        document("state A\n[*] --> A\nA : entry / open\nA : do / read\nA : exit / close\n")
    );
}

#[test]
fn focused_behavior_block_colors_its_label() {
    let items = vec![
        initial_to("A"),
        StateItem::new("A")
            .with_behavior(Behavior {
                entry: Some("open".to_string()),
                do_activity: Some("read".to_string()),
                exit: None,
            })
            .with_click(ClickDescriptor::of_kind(ClickKind::DoOnetime)),
    ];
    assert_eq!(
        render(&items),
        document("state A\n[*] --> A\nA : entry / open\nA : <color:orange>do<color:black> / read\n")
    );
}

#[test]
fn conditional_branch_focus_colors_arrows_of_its_state() {
    let items = vec![
        initial_to("A"),
        StateItem::new("A")
            .with_transition(Transition::to("B"))
            .with_transition(Transition::to("C"))
            .with_click(ClickDescriptor::of_kind(ClickKind::SwitchElseIf)),
        StateItem::new("B").with_transition(Transition::to("C")),
    ];
    assert_eq!(
        render(&items),
        document(
            "state A\nstate B\nstate C\n[*] --> A\nA -[#orange]-> B\nA -[#orange]-> C\nB --> C\n"
        )
    );
}

#[test]
fn names_keep_their_marker_outside_declarations() {
    let items = vec![
        initial_to("A#FF5555"),
        StateItem::new("A#FF5555").with_transition(Transition::to("B")),
    ];
    assert_eq!(
        render(&items),
        document("state A\nstate B\n[*] --> A#FF5555\nA#FF5555 --> B\n")
    );
}

#[test]
fn unnamed_items_are_skipped() {
    let unnamed = StateItem {
        behavior: Behavior {
            entry: Some("x".to_string()),
            ..Default::default()
        },
        ..StateItem::default()
    }
    .with_transition(Transition::to("B"));
    let items = vec![initial_to("A"), unnamed];
    assert_eq!(render(&items), document("state A\nstate B\n[*] --> A\n"));
}

#[test]
fn initial_behaviors_are_not_rendered() {
    let initial = initial_to("A").with_behavior(Behavior {
        entry: Some("x".to_string()),
        ..Default::default()
    });
    assert_eq!(render(&[initial]), document("state A\n[*] --> A\n"));
}

#[test]
fn site_config_overrides_font_and_color() {
    let mut overrides = StmConfig::empty_object();
    overrides.set_value("font.family", serde_json::json!("Arial"));
    overrides.set_value("highlight.color", serde_json::json!("blue"));
    let transpiler = Transpiler::new().with_site_config(overrides);

    let items = vec![
        initial_to("A"),
        StateItem::new("A")
            .with_transition(Transition::to("B"))
            .with_click(ClickDescriptor::of_kind(ClickKind::SwitchIf)),
    ];
    let text = transpiler.transpile(&items);
    assert!(text.starts_with("@startuml\nskinparam defaultFontName \"Arial\"\n"));
    assert!(text.contains("A -[#blue]-> B\n"));
    assert!(!text.starts_with(HEADER));
}

#[test]
fn transpile_value_reads_editor_json() {
    let data = serde_json::json!([
        {"state": "初期状態", "myself": {"condition": true}, "transition": [{"nextState": "待機"}], "behavior": {}},
        {"state": "待機", "transition": [{"nextState": "終了状態", "event": "押す"}], "behavior": {"do": "点滅"}},
    ]);
    let text = Transpiler::new().transpile_value(&data).unwrap();
    assert_eq!(
        text,
        document("state 待機\n[*] --> 待機\n待機 --> [*] :押す\n待機 : do / 点滅\n")
    );
}

#[test]
fn output_is_deterministic() {
    let items = vec![
        initial_to("C"),
        StateItem::new("C").with_transition(Transition::to("B")),
        StateItem::new("B").with_transition(Transition::to("A")),
    ];
    let first = render(&items);
    for _ in 0..5 {
        assert_eq!(render(&items), first);
    }
    assert!(first.contains("state C\nstate B\nstate A\n"));
}
