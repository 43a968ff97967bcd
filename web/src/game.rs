use crate::panels::{DISPLAY_ORDER, RulesPanel, ScorePanel, SolverPanel};
use crate::utils::*;
use clap::Args;
use divinity_core as game;
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, Node};
use yew::prelude::*;

const TICK_MILLIS: u32 = 1_000;
const SIGNAL_MILLIS: u32 = 1_000;

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl HasUpdate for () {
    fn has_update(self) -> bool {
        true
    }
}

impl HasUpdate for game::ClickOutcome {
    fn has_update(self) -> bool {
        game::ClickOutcome::has_update(self)
    }
}

impl HasUpdate for game::TickOutcome {
    fn has_update(self) -> bool {
        game::TickOutcome::has_update(self)
    }
}

impl<T: HasUpdate, E: core::fmt::Display> HasUpdate for Result<T, E> {
    fn has_update(self) -> bool {
        match self {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::debug!("ignored: {}", err);
                false
            }
        }
    }
}

/// What the driver must do with its interval so that it matches the session's lease.
#[derive(Copy, Clone, Debug, PartialEq)]
enum TimerAction {
    Keep,
    Stop,
    /// Drop any held interval and start one for this lease.
    Start(game::TimerLease),
}

fn timer_action(held: Option<game::TimerLease>, current: Option<game::TimerLease>) -> TimerAction {
    match current {
        _ if held == current => TimerAction::Keep,
        Some(lease) => TimerAction::Start(lease),
        None => TimerAction::Stop,
    }
}

/// Score boards in display order, each with the entries of its role.
fn score_boards(session: &game::GameSession) -> Vec<(game::Role, Vec<game::ScoreEntry>)> {
    DISPLAY_ORDER
        .into_iter()
        .map(|role| (role, session.leaderboard(role).cloned().collect()))
        .collect()
}

fn multiplier_class(signal: Option<game::MultiplierSignal>) -> Option<&'static str> {
    use game::MultiplierSignal::*;
    signal.map(|signal| match signal {
        Increase => "increase",
        Reset => "reset",
    })
}

fn start_label(state: game::EngineState) -> &'static str {
    if state.is_finished() {
        "Play Again"
    } else {
        "Start Game"
    }
}

fn ready_label(ready: bool) -> &'static str {
    if ready { "Ready!" } else { "Ready" }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick(game::TimerLease),
    CellClick(game::CellIndex),
    SurfaceClick,
    NameInput(String),
    SelectRole(game::Role),
    Ready,
    Start,
    ClearSignal,
    Discover,
    ClosePopup,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    lit: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CellIndex>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        lit,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("cell", lit.then_some("lit"));
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |e: MouseEvent| {
        // a cell click is never also a surface miss
        e.stop_propagation();
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::GameSession,
    timer: Option<(game::TimerLease, Interval)>,
    signal_timeout: Option<Timeout>,
    popup_open: bool,
    popup_ref: NodeRef,
    name_ref: NodeRef,
    _popup_listener: Option<EventListener>,
}

impl GameView {
    /// Keeps exactly one interval alive, the one matching the session's current timer lease.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        let held = self.timer.as_ref().map(|(lease, _)| *lease);
        let action = timer_action(held, self.session.timer_lease());
        if action == TimerAction::Keep {
            return;
        }

        // dropping the old interval cancels it
        if let Some((stale, _)) = self.timer.take() {
            log::debug!("timer stopped: {:?}", stale);
        }

        if let TimerAction::Start(lease) = action {
            log::debug!("timer started: {:?}", lease);
            let link = ctx.link().clone();
            let interval = Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick(lease)));
            self.timer = Some((lease, interval));
        }
    }

    fn show_signal(&mut self, ctx: &Context<Self>, outcome: game::ClickOutcome) {
        if outcome.signal().is_some() {
            let link = ctx.link().clone();
            self.signal_timeout = Some(Timeout::new(SIGNAL_MILLIS, move || {
                link.send_message(Msg::ClearSignal)
            }));
        }
    }

    fn apply_click(
        &mut self,
        ctx: &Context<Self>,
        result: game::Result<game::ClickOutcome>,
    ) -> bool {
        if let Ok(outcome) = result {
            self.show_signal(ctx, outcome);
        }
        result.has_update()
    }

    fn sync_name_input(&self) {
        if let Some(input) = self.name_ref.cast::<HtmlInputElement>() {
            let name = self.session.profile().name().as_str();
            if input.value() != name {
                input.set_value(name);
            }
        }
    }

    fn open_popup(&mut self, ctx: &Context<Self>) {
        let popup_ref = self.popup_ref.clone();
        let link = ctx.link().clone();
        let listener = EventListener::new(&gloo::utils::document(), "mousedown", move |event| {
            let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            let inside = popup_ref
                .cast::<Node>()
                .is_some_and(|popup| popup.contains(target.as_ref()));
            if !inside {
                link.send_message(Msg::ClosePopup);
            }
        });

        self.popup_open = true;
        self._popup_listener = Some(listener);
    }

    fn close_popup(&mut self) -> bool {
        self._popup_listener = None;
        std::mem::replace(&mut self.popup_open, false)
    }

    fn view_overlay(&self, ctx: &Context<Self>) -> Html {
        use game::EngineState::*;

        let engine = self.session.engine();
        match engine.state() {
            Playing => html! {},
            Countdown => html! {
                <div class="overlay">
                    <span class="countdown">{engine.countdown_remaining()}</span>
                </div>
            },
            Idle | Ended => {
                let ready = self.session.profile().is_ready();
                let onclick = ctx.link().callback(|e: MouseEvent| {
                    e.stop_propagation();
                    Msg::Start
                });
                html! {
                    <div class="overlay">
                        <button class="start" disabled={!ready} {onclick}>
                            {start_label(engine.state())}
                        </button>
                    </div>
                }
            }
        }
    }

    fn view_player(&self, ctx: &Context<Self>) -> Html {
        let profile = self.session.profile();
        let max_len = self.session.config().max_name_len.to_string();

        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::NameInput(input.value())
        });
        let on_ready = ctx.link().callback(|_: MouseEvent| Msg::Ready);
        let ready_class = classes!("ready", profile.is_ready().then_some("confirmed"));

        html! {
            <aside class="player">
                <label>
                    {"Player Name"}
                    <input
                        type="text"
                        ref={self.name_ref.clone()}
                        value={profile.name().as_str().to_owned()}
                        placeholder={format!("Enter name (max {} letters)", max_len)}
                        maxlength={max_len.clone()}
                        {oninput}
                    />
                </label>
                <fieldset>
                    <legend>{"Select Role"}</legend>
                    {
                        for game::Role::ALL.into_iter().map(|role| {
                            let onchange = ctx.link().callback(move |_: Event| Msg::SelectRole(role));
                            html! {
                                <label>
                                    <input
                                        type="radio"
                                        name="role"
                                        checked={profile.role() == role}
                                        {onchange}
                                    />
                                    {role.label()}
                                </label>
                            }
                        })
                    }
                </fieldset>
                <button class={ready_class} disabled={profile.name().is_empty()} onclick={on_ready}>
                    {ready_label(profile.is_ready())}
                </button>
                <RulesPanel/>
            </aside>
        }
    }

    fn view_boards(&self) -> Html {
        let solvers: Vec<game::PlayerName> = self.session.solvers().iter().cloned().collect();

        html! {
            <aside class="boards">
                {
                    for score_boards(&self.session).into_iter().map(|(role, entries)| {
                        html! { <ScorePanel {role} {entries}/> }
                    })
                }
                <SolverPanel names={solvers}/>
            </aside>
        }
    }

    fn view_popup(&self, ctx: &Context<Self>) -> Html {
        if !self.popup_open {
            return html! {};
        }

        let on_close = ctx.link().callback(|_: MouseEvent| Msg::ClosePopup);
        html! {
            <Modal>
                <div class="backdrop">
                    <div class="popup" ref={self.popup_ref.clone()}>
                        <button class="close" onclick={on_close}>{"×"}</button>
                        <h2>{"CONGRATS!"}</h2>
                        <p>{"I see you fellow Decrypter :)"}</p>
                    </div>
                </div>
            </Modal>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            session: game::GameSession::with_seed(game::GameConfig::classic(), seed),
            timer: None,
            signal_timeout: None,
            popup_open: false,
            popup_ref: NodeRef::default(),
            name_ref: NodeRef::default(),
            _popup_listener: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Tick(lease) => self.session.tick_lease(lease).has_update(),
            CellClick(index) => {
                let result = self.session.click(index);
                self.apply_click(ctx, result)
            }
            SurfaceClick => {
                let result = self.session.register_miss();
                self.apply_click(ctx, result)
            }
            NameInput(raw) => {
                let updated = self.session.set_player_name(&raw).map(|_| ()).has_update();
                self.sync_name_input();
                updated
            }
            SelectRole(role) => self.session.set_role(role).has_update(),
            Ready => self.session.confirm_ready().map(|_| ()).has_update(),
            Start => self.session.start().has_update(),
            ClearSignal => {
                self.signal_timeout = None;
                self.session.clear_signal()
            }
            Discover => match self.session.discover() {
                Ok(_) => {
                    self.open_popup(ctx);
                    true
                }
                Err(err) => {
                    log::debug!("ignored: {}", err);
                    false
                }
            },
            ClosePopup => self.close_popup(),
        };

        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let engine = self.session.engine();
        let (cols, rows) = engine.grid().size();
        let playing = engine.state().is_playing();

        let on_surface = ctx.link().callback(|_: MouseEvent| SurfaceClick);
        let on_discover = ctx.link().callback(|_: MouseEvent| Discover);
        let aim_class = classes!(
            "aim",
            self.session.profile().is_ready().then_some("armed")
        );
        let multiplier_classes = classes!("multiplier", multiplier_class(engine.signal()));

        html! {
            <div class="divinity" onclick={on_surface}>
                <h1>
                    <span class={aim_class} onclick={on_discover}>{"AIM"}</span>
                    {" FOR DIVINITY"}
                </h1>
                { self.view_popup(ctx) }
                { self.view_player(ctx) }
                { self.view_boards() }
                <main>
                    <nav>
                        <span>{"Score: "}{engine.score()}</span>
                        <span>{"Multiplier: "}<b class={multiplier_classes}>{format!("x{}", engine.multiplier())}</b></span>
                        <span>{"Time: "}{format!("{}s", engine.time_remaining())}</span>
                    </nav>
                    <div class="board">
                        <table class={classes!(playing.then_some("playable"))}>
                            {
                                for (0..rows).map(|y| html! {
                                    <tr>
                                        {
                                            for (0..cols).map(|x| {
                                                let index = game::coords_to_index((x, y), (cols, rows));
                                                let lit = engine.is_lit(index);
                                                let locked = !playing;
                                                let callback = ctx.link().callback(CellClick);
                                                html! {
                                                    <CellView {index} {lit} {locked} {callback}/>
                                                }
                                            })
                                        }
                                    </tr>
                                })
                            }
                        </table>
                        { self.view_overlay(ctx) }
                    </div>
                </main>
            </div>
        }
    }
}
