use super::*;

fn rendered(f: impl FnOnce(&mut Renderer, &mut Vec<u8>)) -> String {
    let mut renderer = Renderer::new(OutputMode::Text);
    let mut out = Vec::new();
    f(&mut renderer, &mut out);
    String::from_utf8(out).expect("utf8")
}

#[test]
fn formats_clock_as_minutes_and_seconds() {
    assert_eq!(format_clock(1200), "20:00");
    assert_eq!(format_clock(65), "01:05");
    assert_eq!(format_clock(9), "00:09");
    assert_eq!(format_clock(0), "00:00");
}

#[test]
fn alerts_match_the_board_wording() {
    assert_eq!(
        alert_text(&MatchEvent::MatchWon { team: Team::B }),
        "Game Over: Team B wins!"
    );
    assert_eq!(
        alert_text(&MatchEvent::TimeExpired),
        "Time Over: The match has ended!"
    );
}

#[test]
fn board_shows_clock_control_and_scores() {
    let text = rendered(|r, out| {
        r.state(
            out,
            &MatchState {
                score_a: 3,
                score_b: 1,
                time_remaining_secs: 754,
                timer_running: true,
            },
        )
        .expect("render")
    });
    assert_eq!(
        text,
        "Futsal Score\nTime Left: 12:34  [stop]\nTeam A: 3\nTeam B: 1\n"
    );
}

#[test]
fn clock_only_changes_print_a_single_line() {
    let text = rendered(|r, out| {
        let mut state = MatchState {
            timer_running: true,
            ..MatchState::default()
        };
        r.state(out, &state).expect("render");
        state.time_remaining_secs -= 1;
        r.state(out, &state).expect("render");
    });
    assert!(text.ends_with("[stop]\nTeam A: 0\nTeam B: 0\nTime Left: 19:59\n"));
}

#[test]
fn score_change_redraws_the_board() {
    let text = rendered(|r, out| {
        let mut state = MatchState::default();
        r.state(out, &state).expect("render");
        state.score_b = 1;
        r.state(out, &state).expect("render");
    });
    assert_eq!(text.matches("Futsal Score").count(), 2);
    assert!(text.ends_with("Team B: 1\n"));
}

#[test]
fn json_mode_emits_tagged_lines() {
    let mut renderer = Renderer::new(OutputMode::Json);
    let mut out = Vec::new();
    renderer
        .state(&mut out, &MatchState::default())
        .expect("render");
    renderer
        .event(&mut out, &MatchEvent::TimeExpired)
        .expect("render");

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(lines[0]["type"], "state");
    assert_eq!(lines[0]["payload"]["time_remaining_secs"], 1200);
    assert_eq!(
        lines[1],
        serde_json::json!({ "type": "event", "payload": { "type": "time_expired" } })
    );
}
