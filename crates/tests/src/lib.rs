#[cfg(test)]
mod common;


#[cfg(test)]
mod case_update_tests;




#[cfg(test)]
mod summary_tests;

#[cfg(test)]
mod timeline_filter_tests;

#[cfg(test)]
mod timeline_event_tests;

#[cfg(test)]
mod calendar_tests;


#[cfg(test)]
mod document_tests;

#[cfg(test)]
mod inbox_tests;


#[cfg(test)]
mod health_tests;
