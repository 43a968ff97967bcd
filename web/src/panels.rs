use crate::utils::rot13;
use divinity_core::{PlayerName, Role, ScoreEntry};
use yew::prelude::*;

/// Goddesses are always listed above servants, regardless of scores.
pub(crate) const DISPLAY_ORDER: [Role; 2] = [Role::Goddess, Role::Servant];

const SECRET_HINT: &str = "first click Ready, then click the text that says AIM";

#[derive(Properties, PartialEq)]
pub(crate) struct ScorePanelProps {
    pub role: Role,
    pub entries: Vec<ScoreEntry>,
}

#[function_component]
pub(crate) fn ScorePanel(props: &ScorePanelProps) -> Html {
    html! {
        <section class="panel scores">
            <h3>{format!("{} High Scores", props.role.label())}</h3>
            <ol>
                {
                    for props.entries.iter().map(|entry| html! {
                        <li>
                            <span>{entry.name.as_str()}</span>
                            <span>{entry.score}</span>
                        </li>
                    })
                }
            </ol>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SolverPanelProps {
    pub names: Vec<PlayerName>,
}

#[function_component]
pub(crate) fn SolverPanel(props: &SolverPanelProps) -> Html {
    html! {
        <section class="panel solvers">
            <h3>{"Challenger Solvers"}</h3>
            <ul>
                { for props.names.iter().map(|name| html! { <li>{name.as_str()}</li> }) }
            </ul>
        </section>
    }
}

#[function_component]
pub(crate) fn RulesPanel() -> Html {
    let hint = rot13(SECRET_HINT);

    html! {
        <section class="panel rules">
            <h3>{"Rules:"}</h3>
            <ul>
                <li>{"Goddesses are inherently above servants, so their board sits on top no matter how high a servant scores."}</li>
                <li>{"Every 3 lit blocks clicked in a row raise the multiplier by 1. Each lit block clicked adds the multiplier to your score."}</li>
                <li>{"Clicking anything but a lit block is an inaccuracy and resets the multiplier to 1."}</li>
                <li>{"Not everything is explained. Play, find a strategy, have fun."}</li>
            </ul>
            <h3>{"Challenges:"}</h3>
            <ul>
                <li>{"The top servant should ask the top Goddess for a dm."}</li>
                <li>{"FOR L: find the secret button by solving this → "}<code>{hint}</code></li>
            </ul>
        </section>
    }
}
