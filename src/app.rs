//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::layout::{AdminLayout, AuthLayout, PublicLayout, UserLayout};
use crate::net::supabase::SupabaseClient;
use crate::pages::admin::broadcast::AdminBroadcastPage;
use crate::pages::admin::categories::AdminCategoriesPage;
use crate::pages::admin::comments::AdminCommentsPage;
use crate::pages::admin::dashboard::AdminDashboardPage;
use crate::pages::admin::post_editor::PostEditorPage;
use crate::pages::admin::posts::AdminPostsPage;
use crate::pages::auth::forgot_password::ForgotPasswordPage;
use crate::pages::auth::login::LoginPage;
use crate::pages::auth::register::RegisterPage;
use crate::pages::category::CategoryPage;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::post_detail::PostDetailPage;
use crate::pages::profile::ProfilePage;
use crate::pages::search::SearchPage;
use crate::state::auth::AuthState;
use crate::state::notices::NoticeState;
use crate::state::session::{SessionStore, Spawner};

/// The session store as provided through context: one shared instance
/// driving auth state for the whole app.
pub type StoreHandle = Rc<SessionStore<SupabaseClient>>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session store, mirrors its state into the `AuthState`
/// context signal, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());
    provide_context(auth);
    provide_context(notices);

    // Store mutations run as browser-local tasks; on the server nothing
    // is spawned since session resolution only happens after hydration.
    #[cfg(feature = "hydrate")]
    let spawner: Spawner = Rc::new(|fut| leptos::task::spawn_local(fut));
    #[cfg(not(feature = "hydrate"))]
    let spawner: Spawner = Rc::new(|_fut| {});

    let store: StoreHandle = SessionStore::new(SupabaseClient::new(), spawner);
    store.subscribe(move |state| auth.set(state.clone()));
    provide_context(StoredValue::new_local(store.clone()));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(store.clone().initialize());

    view! {
        <Stylesheet id="leptos" href="/pkg/inkpress.css"/>
        <Title text="Inkpress"/>

        <Router>
            <Routes fallback=NotFoundPage>
                <ParentRoute path=StaticSegment("") view=PublicLayout>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route
                        path=(StaticSegment("posts"), ParamSegment("slug"))
                        view=PostDetailPage
                    />
                    <Route
                        path=(StaticSegment("category"), ParamSegment("slug"))
                        view=CategoryPage
                    />
                    <Route path=StaticSegment("search") view=SearchPage/>
                </ParentRoute>

                <ParentRoute path=StaticSegment("auth") view=AuthLayout>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                </ParentRoute>

                <ParentRoute path=StaticSegment("user") view=UserLayout>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </ParentRoute>

                <ParentRoute path=StaticSegment("admin") view=AdminLayout>
                    <Route path=StaticSegment("") view=AdminDashboardPage/>
                    <Route path=StaticSegment("posts") view=AdminPostsPage/>
                    <Route
                        path=(StaticSegment("posts"), StaticSegment("new"))
                        view=PostEditorPage
                    />
                    <Route
                        path=(StaticSegment("posts"), StaticSegment("edit"), ParamSegment("id"))
                        view=PostEditorPage
                    />
                    <Route path=StaticSegment("categories") view=AdminCategoriesPage/>
                    <Route path=StaticSegment("comments") view=AdminCommentsPage/>
                    <Route path=StaticSegment("broadcast") view=AdminBroadcastPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
