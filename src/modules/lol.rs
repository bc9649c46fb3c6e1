use super::components::WidgetData;
use super::{
    item_tags, rune_slot_label, LolChampionsData, LolItemsData, LolRunesData, RuneError, RuneTab,
    CHAMPION_ROLES,
};
use crate::api::{ApiError, ApiResult, Champion, ImageKind, Item, RunePath};
use crate::cache::CatalogService;
use crate::components::ui::{
    AlertDescription, AlertError, AlertTitle, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, Input, Spinner,
};
use icons::{Plus, X};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::Arc;

type Loaded<T> = RwSignal<Option<Result<(String, Arc<Vec<T>>), ApiError>>>;

/// Kick off a catalog read; the signal fills in when it lands.
fn load_catalog<T, Fut>(what: &'static str, fetch: Fut) -> Loaded<T>
where
    T: Send + Sync + 'static,
    Fut: Future<Output = ApiResult<(String, Arc<Vec<T>>)>> + 'static,
{
    let state: Loaded<T> = RwSignal::new(None);
    spawn_local(async move {
        let result = fetch.await;
        if let Err(e) = &result {
            tracing::warn!(catalog = what, error = %e, "catalog load failed");
        }
        // The widget may be gone by now.
        let _ = state.try_set(Some(result));
    });
    state
}

fn badge_class(active: bool) -> &'static str {
    if active {
        "rounded-md border border-transparent bg-primary text-primary-foreground px-2.5 py-0.5 text-xs font-medium cursor-pointer"
    } else {
        "rounded-md border px-2.5 py-0.5 text-xs font-medium cursor-pointer hover:bg-accent"
    }
}

#[component]
fn CatalogLoading(label: &'static str) -> impl IntoView {
    view! {
        <div class="p-4 flex items-center justify-center gap-2 text-sm text-muted-foreground">
            <Spinner />
            {label}
        </div>
    }
}

#[component]
fn CatalogError(title: &'static str, error: ApiError) -> impl IntoView {
    view! {
        <AlertError>
            <AlertTitle>{title}</AlertTitle>
            <AlertDescription>{error.to_string()}</AlertDescription>
        </AlertError>
    }
}

/// Inline notice for a refused pick; cleared by the next successful one.
#[component]
fn SelectionNotice(notice: RwSignal<Option<RuneError>>) -> impl IntoView {
    move || {
        notice.get().map(|e| {
            view! {
                <AlertError class="mb-4">
                    <AlertTitle>
                        {match e {
                            RuneError::SecondaryFull => "Maximum runes selected",
                            _ => "Invalid selection",
                        }}
                    </AlertTitle>
                    <AlertDescription>{e.to_string()}</AlertDescription>
                </AlertError>
            }
        })
    }
}

#[component]
pub(crate) fn LolChampionPicker(widget: WidgetData) -> impl IntoView {
    let catalogs = expect_context::<CatalogService>();
    let loaded = load_catalog("champions", async move { catalogs.champions().await });

    let search: RwSignal<String> = RwSignal::new(String::new());
    let picker_open: RwSignal<bool> = RwSignal::new(false);
    let current = Memo::new(move |_| widget.read::<LolChampionsData>());

    let add = move |champion_id: String| {
        widget.update(|d: &mut LolChampionsData| d.add(&champion_id));
        picker_open.set(false);
        search.set(String::new());
    };
    let remove = move |champion_id: String| {
        widget.update(|d: &mut LolChampionsData| d.remove(&champion_id));
    };

    let body = move |version: String, catalog: Arc<Vec<Champion>>| {
        let version = StoredValue::new(version);
        let catalog = StoredValue::new(catalog);
        let portrait = move |c: &Champion| {
            version.with_value(|v| catalogs.image_url(ImageKind::Champion, v, &c.image.full))
        };

        view! {
            <div class="flex flex-wrap gap-2 mb-4">
                {CHAMPION_ROLES
                    .iter()
                    .map(|&role| {
                        view! {
                            <button
                                class=move || badge_class(current.get().has_role(role))
                                on:click=move |_| {
                                    widget.update(|d: &mut LolChampionsData| d.toggle_role(role));
                                }
                            >
                                {role}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="flex justify-between items-center mb-4">
                <h3 class="text-lg font-semibold">"Champions"</h3>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=move |_| picker_open.update(|o| *o = !*o)
                >
                    <Plus class="h-4 w-4" />
                    "Add Champion"
                </Button>
            </div>

            <Show when=move || picker_open.get()>
                <div class="mb-4 rounded-md border p-2 flex flex-col gap-2">
                    <Input bind_value=search placeholder="Search champions..." autofocus=true />
                    <div class="max-h-[300px] overflow-y-auto flex flex-col">
                        {move || {
                            let data = current.get();
                            let needle = search.get();
                            let found: Vec<Champion> = catalog
                                .with_value(|all| {
                                    data.candidates(all, &needle).into_iter().cloned().collect()
                                });
                            if found.is_empty() {
                                return view! {
                                    <p class="p-2 text-sm text-muted-foreground">"No champions found."</p>
                                }
                                    .into_any();
                            }
                            found
                                .into_iter()
                                .map(|c| {
                                    let src = portrait(&c);
                                    let id = c.id.clone();
                                    view! {
                                        <button
                                            class="flex items-center gap-2 p-1 rounded hover:bg-accent text-left text-sm"
                                            on:click=move |_| add(id.clone())
                                        >
                                            <img src=src alt=c.name.clone() class="w-8 h-8 rounded-full" />
                                            <span>{c.name.clone()}</span>
                                        </button>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>
            </Show>

            {move || {
                let data = current.get();
                let selected: Vec<Champion> = catalog
                    .with_value(|all| data.selected(all).into_iter().cloned().collect());
                if selected.is_empty() {
                    return view! {
                        <div class="text-center text-muted-foreground py-8">
                            <p>"No champions selected. Click \"Add Champion\" to get started."</p>
                        </div>
                    }
                        .into_any();
                }
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {selected
                            .into_iter()
                            .map(|c| {
                                let src = portrait(&c);
                                let id = c.id.clone();
                                view! {
                                    <Card class="overflow-hidden py-0 gap-0">
                                        <div class="relative">
                                            <img src=src alt=c.name.clone() class="w-full h-32 object-cover" />
                                            <Button
                                                variant=ButtonVariant::Destructive
                                                size=ButtonSize::Icon
                                                class="absolute top-2 right-2 h-6 w-6"
                                                on:click=move |_| remove(id.clone())
                                            >
                                                <X class="h-3 w-3" />
                                            </Button>
                                        </div>
                                        <CardHeader class="py-2 px-3">
                                            <CardTitle class="text-sm">{c.name.clone()}</CardTitle>
                                        </CardHeader>
                                        <CardContent class="pb-2 px-3 flex flex-wrap gap-1">
                                            {c.tags
                                                .iter()
                                                .map(|t| {
                                                    view! {
                                                        <span class="rounded bg-secondary px-1.5 text-xs">
                                                            {t.clone()}
                                                        </span>
                                                    }
                                                })
                                                .collect_view()}
                                        </CardContent>
                                    </Card>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
        }
    };

    view! {
        <div class="lol-champion-module rounded-lg border border-border bg-card p-4">
            {move || match loaded.get() {
                None => view! { <CatalogLoading label="Loading champions..." /> }.into_any(),
                Some(Err(e)) => {
                    view! { <CatalogError title="Error loading champions" error=e /> }.into_any()
                }
                Some(Ok((version, catalog))) => body(version, catalog).into_any(),
            }}
        </div>
    }
}

#[component]
pub(crate) fn LolItemPicker(widget: WidgetData) -> impl IntoView {
    let catalogs = expect_context::<CatalogService>();
    let loaded = load_catalog("items", async move { catalogs.items().await });

    let search: RwSignal<String> = RwSignal::new(String::new());
    let tag_filter: RwSignal<Option<String>> = RwSignal::new(None);
    let picker_open: RwSignal<bool> = RwSignal::new(false);
    let current = Memo::new(move |_| widget.read::<LolItemsData>());

    let add = move |item_id: String| {
        widget.update(|d: &mut LolItemsData| d.add(&item_id));
        picker_open.set(false);
        search.set(String::new());
    };
    let remove = move |item_id: String| {
        widget.update(|d: &mut LolItemsData| d.remove(&item_id));
    };

    let body = move |version: String, catalog: Arc<Vec<Item>>| {
        let tags = item_tags(&catalog);
        let version = StoredValue::new(version);
        let catalog = StoredValue::new(catalog);
        let icon = move |i: &Item| {
            version.with_value(|v| catalogs.image_url(ImageKind::Item, v, &i.image.full))
        };

        view! {
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-lg font-semibold">"Items"</h3>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=move |_| picker_open.update(|o| *o = !*o)
                >
                    <Plus class="h-4 w-4" />
                    "Add Item"
                </Button>
            </div>

            <Show when=move || picker_open.get()>
                <div class="mb-4 rounded-md border p-2 flex flex-col gap-2">
                    <Input bind_value=search placeholder="Search items..." autofocus=true />
                    <div class="flex flex-wrap gap-1">
                        {tags
                            .iter()
                            .map(|tag| {
                                let tag = tag.clone();
                                let label = tag.clone();
                                let active = {
                                    let tag = tag.clone();
                                    move || tag_filter.get().as_deref() == Some(tag.as_str())
                                };
                                view! {
                                    <button
                                        class=move || badge_class(active())
                                        on:click=move |_| {
                                            let tag = tag.clone();
                                            tag_filter.update(|t| {
                                                *t = if t.as_deref() == Some(tag.as_str()) { None } else { Some(tag) };
                                            });
                                        }
                                    >
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="max-h-[300px] overflow-y-auto flex flex-col">
                        {move || {
                            let data = current.get();
                            let needle = search.get();
                            let tag = tag_filter.get();
                            let found: Vec<Item> = catalog
                                .with_value(|all| {
                                    data.candidates(all, &needle, tag.as_deref())
                                        .into_iter()
                                        .cloned()
                                        .collect()
                                });
                            if found.is_empty() {
                                return view! {
                                    <p class="p-2 text-sm text-muted-foreground">"No items found."</p>
                                }
                                    .into_any();
                            }
                            found
                                .into_iter()
                                .map(|i| {
                                    let src = icon(&i);
                                    let id = i.id.clone();
                                    view! {
                                        <button
                                            class="flex items-center gap-2 p-1 rounded hover:bg-accent text-left text-sm"
                                            on:click=move |_| add(id.clone())
                                        >
                                            <img src=src alt=i.name.clone() class="w-8 h-8 rounded" />
                                            <div>
                                                <div>{i.name.clone()}</div>
                                                <div class="text-xs text-muted-foreground">
                                                    {format!("{} gold", i.gold.total)}
                                                </div>
                                            </div>
                                        </button>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>
            </Show>

            {move || {
                let data = current.get();
                let selected: Vec<Item> = catalog
                    .with_value(|all| data.selected(all).into_iter().cloned().collect());
                if selected.is_empty() {
                    return view! {
                        <div class="text-center text-muted-foreground py-8">
                            <p>"No items selected. Click \"Add Item\" to get started."</p>
                        </div>
                    }
                        .into_any();
                }
                view! {
                    <div class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-6 gap-3">
                        {selected
                            .into_iter()
                            .map(|i| {
                                let src = icon(&i);
                                let id = i.id.clone();
                                view! {
                                    <Card class="relative items-center py-3 gap-1" attr:title=i.plaintext.clone()>
                                        <Button
                                            variant=ButtonVariant::Destructive
                                            size=ButtonSize::Icon
                                            class="absolute top-1 right-1 h-5 w-5"
                                            on:click=move |_| remove(id.clone())
                                        >
                                            <X class="h-3 w-3" />
                                        </Button>
                                        <img src=src alt=i.name.clone() class="w-12 h-12 rounded" />
                                        <CardTitle class="text-xs text-center truncate px-2">
                                            {i.name.clone()}
                                        </CardTitle>
                                    </Card>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
        }
    };

    view! {
        <div class="lol-item-module rounded-lg border border-border bg-card p-4">
            {move || match loaded.get() {
                None => view! { <CatalogLoading label="Loading items..." /> }.into_any(),
                Some(Err(e)) => {
                    view! { <CatalogError title="Error loading items" error=e /> }.into_any()
                }
                Some(Ok((version, catalog))) => body(version, catalog).into_any(),
            }}
        </div>
    }
}

#[component]
pub(crate) fn LolRunePicker(widget: WidgetData) -> impl IntoView {
    let catalogs = expect_context::<CatalogService>();
    let loaded = load_catalog("runes", async move { catalogs.runes().await });

    let tab: RwSignal<RuneTab> = RwSignal::new(RuneTab::Primary);
    let notice: RwSignal<Option<RuneError>> = RwSignal::new(None);
    let current = Memo::new(move |_| widget.read::<LolRunesData>());

    let body = move |paths: Arc<Vec<RunePath>>| {
        let paths = StoredValue::new(paths);

        let pick_path = move |path_id: i64| {
            let result = paths.with_value(|all| {
                widget.update(|d: &mut LolRunesData| d.select_path(tab.get_untracked(), path_id, all))
            });
            match result {
                Ok(next) => {
                    notice.set(None);
                    tab.set(next);
                }
                Err(e) => notice.set(Some(e)),
            }
        };
        let pick_rune = move |rune_id: i64, path_id: i64, slot: usize| {
            let result = paths.with_value(|all| {
                widget.update(|d: &mut LolRunesData| d.select_rune(rune_id, path_id, slot, all))
            });
            match result {
                Ok(_) => notice.set(None),
                Err(e) => notice.set(Some(e)),
            }
        };

        // Path cards for the active tab. The secondary tab hides the primary.
        let path_cards = move || {
            let data = current.get();
            let on_secondary = tab.get() == RuneTab::Secondary;
            let chosen = if on_secondary { data.secondary_path } else { data.primary_path };
            paths.with_value(|all| {
                all.iter()
                    .filter(|p| !on_secondary || Some(p.id) != data.primary_path)
                    .map(|p| {
                        let path_id = p.id;
                        let icon = catalogs.rune_image_url(&p.icon);
                        let name = p.name.clone();
                        let ring = if chosen == Some(path_id) {
                            "cursor-pointer transition-all ring-2 ring-primary"
                        } else {
                            "cursor-pointer transition-all hover:bg-accent"
                        };
                        view! {
                            <Card class=ring on:click=move |_| pick_path(path_id)>
                                <CardContent class="flex flex-col items-center p-4">
                                    <img src=icon alt=name.clone() class="w-16 h-16 object-contain" />
                                    <CardTitle class="text-sm mt-2 text-center">{name}</CardTitle>
                                </CardContent>
                            </Card>
                        }
                    })
                    .collect_view()
            })
        };

        // Slots of the chosen path on the active tab; the secondary skips keystones.
        let slots = move || {
            let data = current.get();
            let on_secondary = tab.get() == RuneTab::Secondary;
            let path_id = if on_secondary { data.secondary_path } else { data.primary_path };
            let path = paths.with_value(|all| {
                path_id.and_then(|id| all.iter().find(|p| p.id == id).cloned())
            })?;
            let heading = tab.get().heading(&path.name);
            let first_slot = tab.get().first_slot();
            Some(view! {
                <div class="mt-6">
                    <h3 class="text-lg font-semibold mb-4">{heading}</h3>
                    <div class="space-y-6">
                        {path
                            .slots
                            .iter()
                            .enumerate()
                            .skip(first_slot)
                            .map(|(slot_index, slot)| {
                                let label = rune_slot_label(slot_index);
                                view! {
                                    <div>
                                        <h4 class="text-sm font-medium mb-2">{label}</h4>
                                        <div class="grid grid-cols-3 md:grid-cols-4 lg:grid-cols-6 gap-2">
                                            {slot
                                                .runes
                                                .iter()
                                                .map(|r| {
                                                    let rune_id = r.id;
                                                    let ring = if data.is_selected(rune_id) {
                                                        "cursor-pointer transition-all ring-2 ring-primary"
                                                    } else {
                                                        "cursor-pointer transition-all hover:bg-accent"
                                                    };
                                                    let path_id = path.id;
                                                    let icon = catalogs.rune_image_url(&r.icon);
                                                    let name = r.name.clone();
                                                    let desc = r.short_desc.clone();
                                                    view! {
                                                        <Card
                                                            class=ring
                                                            attr:title=desc
                                                            on:click=move |_| pick_rune(rune_id, path_id, slot_index)
                                                        >
                                                            <CardContent class="flex flex-col items-center p-2">
                                                                <img src=icon alt=name.clone() class="w-10 h-10 object-contain" />
                                                                <div class="text-xs mt-1 text-center">{name}</div>
                                                            </CardContent>
                                                        </Card>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            })
        };

        let tab_class = move |t: RuneTab| {
            if tab.get() == t {
                "flex-1 rounded-md bg-background px-3 py-1.5 text-sm font-medium shadow-sm"
            } else {
                "flex-1 rounded-md px-3 py-1.5 text-sm text-muted-foreground disabled:opacity-50"
            }
        };

        view! {
            <SelectionNotice notice=notice />
            <div class="grid w-full grid-cols-2 gap-1 rounded-lg bg-muted p-1">
                <button class=move || tab_class(RuneTab::Primary) on:click=move |_| tab.set(RuneTab::Primary)>
                    "Primary Path"
                </button>
                <button
                    class=move || tab_class(RuneTab::Secondary)
                    disabled=move || current.get().primary_path.is_none()
                    on:click=move |_| tab.set(RuneTab::Secondary)
                >
                    "Secondary Path"
                </button>
            </div>
            <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-5 gap-4 mt-4">{path_cards}</div>
            {slots}
        }
    };

    view! {
        <div class="lol-rune-module rounded-lg border border-border bg-card p-4">
            {move || match loaded.get() {
                None => view! { <CatalogLoading label="Loading runes..." /> }.into_any(),
                Some(Err(e)) => {
                    view! { <CatalogError title="Error loading runes" error=e /> }.into_any()
                }
                Some(Ok((_version, paths))) => body(paths).into_any(),
            }}
        </div>
    }
}
