//! Layout shells the router nests pages into.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::components::guard::{RequireAuth, RequireRole};
use crate::components::nav_bar::NavBar;
use crate::components::notices::NoticeList;
use crate::net::types::Role;

/// Public reading layout: header, content, footer.
#[component]
pub fn PublicLayout() -> impl IntoView {
    view! {
        <div class="layout layout--public">
            <NavBar/>
            <NoticeList/>
            <main class="layout__content">
                <Outlet/>
            </main>
            <footer class="layout__footer">
                <p>"Inkpress"</p>
            </footer>
        </div>
    }
}

/// Centered card layout for the sign-in/register/reset pages.
#[component]
pub fn AuthLayout() -> impl IntoView {
    view! {
        <div class="layout layout--auth">
            <NoticeList/>
            <div class="auth-card">
                <a class="auth-card__brand" href="/">
                    "Inkpress"
                </a>
                <Outlet/>
            </div>
        </div>
    }
}

/// Layout for signed-in user pages; same chrome as public, gated.
#[component]
pub fn UserLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <div class="layout layout--public">
                <NavBar/>
                <NoticeList/>
                <main class="layout__content">
                    <Outlet/>
                </main>
            </div>
        </RequireAuth>
    }
}

/// Admin layout: role-gated, with the management sidebar.
#[component]
pub fn AdminLayout() -> impl IntoView {
    view! {
        <RequireRole allowed=vec![Role::Admin]>
            <div class="layout layout--admin">
                <NavBar/>
                <NoticeList/>
                <div class="layout__body">
                    <aside class="admin-nav">
                        <a href="/admin">"Dashboard"</a>
                        <a href="/admin/posts">"Posts"</a>
                        <a href="/admin/categories">"Categories"</a>
                        <a href="/admin/comments">"Comments"</a>
                        <a href="/admin/broadcast">"Broadcast"</a>
                    </aside>
                    <main class="layout__content">
                        <Outlet/>
                    </main>
                </div>
            </div>
        </RequireRole>
    }
}
