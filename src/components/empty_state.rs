use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct EmptyStateProps {
    pub on_pick: Callback<()>,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    let pick = {
        let cb = props.on_pick.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; gap:14px; min-height:60vh; text-align:center;">
            <h2 style="margin:0;">{"Compare images across folders"}</h2>
            <p style="margin:0; max-width:420px; opacity:0.7; font-size:14px;">
                {"Pick two or more folders; files sharing a filename are lined up \
                  side by side. Scroll to zoom, drag to pan, double-click to reset."}
            </p>
            <button onclick={pick} style="padding:8px 18px;">{"Select Folders"}</button>
        </div>
    }
}
