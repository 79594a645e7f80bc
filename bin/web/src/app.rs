//! Main Leptos application component and routing.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_navigate,
    path,
};
use timetable_admin_platform_access::{LOGIN_PATH, Role};

use crate::guard::ProtectedRoute;
use crate::pages::{
    DepartmentPage, DeptAdminDashboard, HomePage, LoginPage, MainAdminDashboard, NotFoundPage,
    StaffDashboard, TimetableGeneratorPage,
};
use crate::session::{provide_session, use_session};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_session();

    view! {
        <Title text="Timetable Admin"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=NotFoundPage>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route
                        path=path!("/main-admin")
                        view=|| view! {
                            <ProtectedRoute role=Role::MainAdmin>
                                <MainAdminDashboard/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=path!("/dept-admin")
                        view=|| view! {
                            <ProtectedRoute role=Role::DeptAdmin>
                                <DeptAdminDashboard/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=path!("/staff")
                        view=|| view! {
                            <ProtectedRoute role=Role::Staff>
                                <StaffDashboard/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=path!("/timetable-generator")
                        view=|| view! {
                            <ProtectedRoute>
                                <TimetableGeneratorPage/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=path!("/department/:dept_id")
                        view=|| view! {
                            <ProtectedRoute>
                                <DepartmentPage/>
                            </ProtectedRoute>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Header with the signed-in user and a logout button.
#[component]
fn Header() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let navigate = navigate.clone();
        session.logout(move || navigate(LOGIN_PATH, Default::default()));
    };

    view! {
        <header class="header">
            <div class="header-left">
                <a href="/" class="logo">"Timetable Admin"</a>
            </div>
            <div class="header-right">
                {move || match session.user() {
                    Some(user) => view! {
                        <div class="user-menu">
                            <a href=user.role().home_path() class="user-name">
                                {user.name().to_string()}
                            </a>
                            <span class="user-role">{user.role().label()}</span>
                            <button class="logout-button" on:click=on_logout.clone()>
                                "Log out"
                            </button>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <a href=LOGIN_PATH class="login-button">"Log in"</a>
                    }
                    .into_any(),
                }}
            </div>
        </header>
    }
}
