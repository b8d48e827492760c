//! dexgrid - creature catalog TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Constraint, Layout};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use dexgrid::action::Action;
use dexgrid::api;
use dexgrid::components::{
    CatalogDisplay, CatalogDisplayProps, Component, DetailPanel, DetailPanelProps, NoticeModal,
    NoticeModalProps, SearchOverlay, SearchOverlayProps, DETAIL_PANEL_WIDTH,
};
use dexgrid::effect::Effect;
use dexgrid::reducer::reducer;
use dexgrid::sprite;
use dexgrid::state::{AppState, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "dexgrid")]
#[command(about = "A creature catalog browser for the terminal")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Display,
    Detail,
    Search,
    Notice,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Main,
    Search,
    Notice,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.notice.is_some() {
            Some(DexComponentId::Notice)
        } else if self.search_mode {
            Some(DexComponentId::Search)
        } else {
            Some(DexComponentId::Display)
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.notice.is_some() {
            Some(DexComponentId::Notice)
        } else if self.search_mode {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Display | DexComponentId::Detail => DexContext::Main,
            DexComponentId::Search => DexContext::Search,
            DexComponentId::Notice => DexContext::Notice,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

struct DexUi {
    display: CatalogDisplay,
    detail: DetailPanel,
    search: SearchOverlay,
    notice: NoticeModal,
}

impl DexUi {
    fn new() -> Self {
        Self {
            display: CatalogDisplay::new(),
            detail: DetailPanel,
            search: SearchOverlay::new(),
            notice: NoticeModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: ratatui::layout::Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let overlay_open = state.search_mode || state.notice.is_some();
        let grid_focused = render_ctx.is_focused() && !overlay_open;

        // The detail panel slides in as a right-hand column.
        let (display_area, detail_area) = if state.detail_id.is_some() {
            let chunks = Layout::horizontal([
                Constraint::Min(1),
                Constraint::Length(DETAIL_PANEL_WIDTH),
            ])
            .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        event_ctx.set_component_area(DexComponentId::Display, display_area);
        self.display.render(
            frame,
            display_area,
            CatalogDisplayProps {
                state,
                is_focused: grid_focused,
            },
        );

        if let Some(detail_area) = detail_area {
            event_ctx.set_component_area(DexComponentId::Detail, detail_area);
            self.detail.render(
                frame,
                detail_area,
                DetailPanelProps {
                    state,
                    is_focused: grid_focused,
                },
            );
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Detail);
        }

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(50, 8, area);
            event_ctx.set_component_area(DexComponentId::Search, modal_area);
            self.search.render(
                frame,
                area,
                SearchOverlayProps {
                    query: &state.search_query,
                    is_focused: render_ctx.is_focused() && state.notice.is_none(),
                    on_query_change: Action::SearchQueryChange,
                    on_query_submit: Action::SearchQuerySubmit,
                },
            );
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }

        if let Some(message) = &state.notice {
            let modal_area = centered_rect(44, 5, area);
            event_ctx.set_component_area(DexComponentId::Notice, modal_area);
            self.notice.render(
                frame,
                area,
                NoticeModalProps {
                    message,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Notice);
        }
    }

    /// The detail panel shares focus with the grid; it gets first pick so
    /// its close key works while arrow keys keep moving the grid cursor.
    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let mut actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                DetailPanelProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        if actions.is_empty() {
            actions = self
                .display
                .handle_event(
                    event,
                    CatalogDisplayProps {
                        state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
        }
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let actions: Vec<_> = self
            .search
            .handle_event(
                event,
                SearchOverlayProps {
                    query: &state.search_query,
                    is_focused: true,
                    on_query_change: Action::SearchQueryChange,
                    on_query_submit: Action::SearchQuerySubmit,
                },
            )
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_notice_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let message = state.notice.as_deref().unwrap_or_default();
        let actions: Vec<_> = self
            .notice
            .handle_event(
                event,
                NoticeModalProps {
                    message,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(DexComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_notice = Rc::clone(&ui);
    bus.register(DexComponentId::Notice, move |event, state| {
        ui_notice
            .borrow_mut()
            .handle_notice_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPage { offset, limit } => {
            ctx.tasks().spawn(TaskKey::new("page"), async move {
                match api::fetch_page(offset, limit).await {
                    Ok(records) => Action::PageDidLoad(records),
                    Err(error) => Action::PageDidError(error),
                }
            });
        }
        Effect::FetchTypes => {
            ctx.tasks().spawn(TaskKey::new("types"), async {
                match api::fetch_type_list().await {
                    Ok(types) => Action::TypesDidLoad(types),
                    Err(error) => Action::TypesDidError(error),
                }
            });
        }
        Effect::FetchSprite { id, url } => {
            let key = format!("sprite_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_bytes(&url).await {
                    Ok(bytes) => match sprite::decode_sprite(&bytes) {
                        Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                        Err(error) => Action::SpriteDidError { id, error },
                    },
                    Err(error) => Action::SpriteDidError { id, error },
                }
            });
        }
    }
}
